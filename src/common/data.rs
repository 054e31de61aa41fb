extern crate serde_regex;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{convert::TryFrom, fmt, str::FromStr};

/// Error type returned by user supplied body predicates.
pub type PredicateError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("a strategy list must contain at least one strategy")]
    EmptyStrategyList,
    #[error("Cannot parse value as regex: {0}")]
    InvalidRegex(#[from] regex::Error),
    #[error("Invalid body definition: {0}")]
    InvalidDefinition(String),
    #[error("JSONConversionError: {0}")]
    JSONConversionError(#[from] serde_json::Error),
    #[error("YAMLConversionError: {0}")]
    YAMLConversionError(String),
    #[error("Body predicate failed: {0}")]
    PredicateFailed(#[source] PredicateError),
}

/// The kind of body the request processing pipeline detected for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// No body was present or it could not be classified.
    None,
    Text,
    StructuredTree,
    RawBytes,
}

/// A read-only snapshot of an observed request body.
///
/// A body is exposed through up to three views, depending on its [BodyKind]:
///
/// | kind             | text | bytes | structured |
/// |------------------|------|-------|------------|
/// | `None`           |      |       |            |
/// | `Text`           | yes  | yes   |            |
/// | `StructuredTree` | yes  |       | yes        |
/// | `RawBytes`       |      | yes   |            |
///
/// The constructors are the only way to build a view, so the table above always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyView {
    kind: BodyKind,
    text: Option<String>,
    bytes: Option<Bytes>,
    structured: Option<Value>,
}

impl BodyView {
    /// A view for a request that carried no (classifiable) body.
    pub fn none() -> Self {
        Self {
            kind: BodyKind::None,
            text: None,
            bytes: None,
            structured: None,
        }
    }

    /// A textual body. The byte view holds the UTF-8 encoding of the text.
    pub fn text<T: Into<String>>(text: T) -> Self {
        let text = text.into();
        Self {
            kind: BodyKind::Text,
            bytes: Some(Bytes::from(text.clone().into_bytes())),
            text: Some(text),
            structured: None,
        }
    }

    /// A binary body without a textual representation.
    pub fn bytes<B: Into<Bytes>>(bytes: B) -> Self {
        Self {
            kind: BodyKind::RawBytes,
            text: None,
            bytes: Some(bytes.into()),
            structured: None,
        }
    }

    /// A parsed body. The text view is the compact JSON rendering of `value`.
    pub fn structured(value: Value) -> Self {
        Self::structured_with_text(value.to_string(), value)
    }

    /// A parsed body that keeps the text it was parsed from.
    pub fn structured_with_text<T: Into<String>>(text: T, value: Value) -> Self {
        Self {
            kind: BodyKind::StructuredTree,
            text: Some(text.into()),
            bytes: None,
            structured: Some(value),
        }
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn as_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    pub fn as_structured(&self) -> Option<&Value> {
        self.structured.as_ref()
    }
}

impl Default for BodyView {
    fn default() -> Self {
        Self::none()
    }
}

/// A regular expression that can be (de)serialized as part of a body definition.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BodyRegex(#[serde(with = "serde_regex")] pub regex::Regex);

impl PartialEq for BodyRegex {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

impl Eq for BodyRegex {}

impl From<regex::Regex> for BodyRegex {
    fn from(value: regex::Regex) -> Self {
        BodyRegex(value)
    }
}

impl TryFrom<&str> for BodyRegex {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(BodyRegex(regex::Regex::from_str(value)?))
    }
}

impl fmt::Display for BodyRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn none_view_has_no_payload() {
        let view = BodyView::none();
        assert_eq!(view.kind(), BodyKind::None);
        assert!(view.as_text().is_none());
        assert!(view.as_bytes().is_none());
        assert!(view.as_structured().is_none());
    }

    #[test]
    fn text_view_is_also_bytes() {
        let view = BodyView::text("héllo");
        assert_eq!(view.kind(), BodyKind::Text);
        assert_eq!(view.as_text(), Some("héllo"));
        assert_eq!(view.as_bytes(), Some("héllo".as_bytes()));
        assert!(view.as_structured().is_none());
    }

    #[test]
    fn bytes_view_has_no_text() {
        let view = BodyView::bytes(vec![0xff, 0x00]);
        assert_eq!(view.kind(), BodyKind::RawBytes);
        assert!(view.as_text().is_none());
        assert_eq!(view.as_bytes(), Some(&[0xff, 0x00][..]));
    }

    #[test]
    fn structured_view_keeps_text_but_no_bytes() {
        let view = BodyView::structured(json!({"a": 1}));
        assert_eq!(view.kind(), BodyKind::StructuredTree);
        assert_eq!(view.as_text(), Some(r#"{"a":1}"#));
        assert!(view.as_bytes().is_none());
        assert_eq!(view.as_structured(), Some(&json!({"a": 1})));

        let view = BodyView::structured_with_text("{ \"a\": 1 }", json!({"a": 1}));
        assert_eq!(view.as_text(), Some("{ \"a\": 1 }"));
    }

    #[test]
    fn regex_from_invalid_str_fails() {
        assert!(BodyRegex::try_from("(unclosed").is_err());
        assert_eq!(BodyRegex::try_from("^a+$").unwrap().to_string(), "^a+$");
    }
}
