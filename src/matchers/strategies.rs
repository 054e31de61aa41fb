use crate::{
    common::{
        data::{BodyRegex, Error},
        util::BodyBytes,
    },
    matchers::{
        comparison::{
            bytes_similarity, json_equals, json_includes, parse_json, string_similarity,
            substring_similarity, wildcard_to_regex,
        },
        strategy::{score_from_bool, Capability, MatchStrategy, Payload, MISMATCH},
    },
};
use serde_json::Value;

// ************************************************************************************************
// PresenceStrategy
// ************************************************************************************************
/// Matches any non-empty body.
#[derive(Debug, Clone, Default)]
pub struct PresenceStrategy {}

impl PresenceStrategy {
    pub fn new() -> Self {
        Self {}
    }
}

impl MatchStrategy for PresenceStrategy {
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::Presence]
    }

    fn test(&self, payload: Payload<'_>) -> f64 {
        score_from_bool(match payload {
            Payload::Text(text) => !text.is_empty(),
            Payload::Bytes(bytes) => !bytes.is_empty(),
            Payload::Structured(_) => true,
        })
    }

    fn name(&self) -> &'static str {
        "present"
    }
}

// ************************************************************************************************
// EqualToStrategy
// ************************************************************************************************
#[derive(Debug, Clone)]
enum TextExpectation {
    Literal { text: String, case_sensitive: bool },
    Wildcard { pattern: String, regex: regex::Regex },
}

/// Compares the body text against a literal or a wildcard pattern.
///
/// Literal mismatches are graded by their Levenshtein similarity to the expectation.
/// Wildcard patterns either match or they don't.
#[derive(Debug, Clone)]
pub struct EqualToStrategy {
    expectation: TextExpectation,
}

impl EqualToStrategy {
    pub fn literal<T: Into<String>>(text: T) -> Self {
        Self {
            expectation: TextExpectation::Literal {
                text: text.into(),
                case_sensitive: true,
            },
        }
    }

    pub fn literal_ignore_case<T: Into<String>>(text: T) -> Self {
        Self {
            expectation: TextExpectation::Literal {
                text: text.into(),
                case_sensitive: false,
            },
        }
    }

    /// `*` matches any sequence of characters, `?` any single character.
    pub fn wildcard<T: Into<String>>(pattern: T) -> Result<Self, Error> {
        let pattern = pattern.into();
        let regex = regex::Regex::new(&wildcard_to_regex(&pattern))?;
        Ok(Self {
            expectation: TextExpectation::Wildcard { pattern, regex },
        })
    }
}

impl MatchStrategy for EqualToStrategy {
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::TextualValue]
    }

    fn test(&self, payload: Payload<'_>) -> f64 {
        let text = match payload {
            Payload::Text(text) => text,
            _ => return MISMATCH,
        };

        match &self.expectation {
            TextExpectation::Literal {
                text: expected,
                case_sensitive,
            } => string_similarity(*case_sensitive, expected, text),
            TextExpectation::Wildcard { regex, .. } => score_from_bool(regex.is_match(text)),
        }
    }

    fn name(&self) -> &'static str {
        match self.expectation {
            TextExpectation::Literal { .. } => "equal_to",
            TextExpectation::Wildcard { .. } => "wildcard",
        }
    }
}

// ************************************************************************************************
// ContainsStrategy
// ************************************************************************************************
/// Matches if the body text contains the expected substring.
#[derive(Debug, Clone)]
pub struct ContainsStrategy {
    substring: String,
}

impl ContainsStrategy {
    pub fn new<T: Into<String>>(substring: T) -> Self {
        Self {
            substring: substring.into(),
        }
    }
}

impl MatchStrategy for ContainsStrategy {
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::TextualValue]
    }

    fn test(&self, payload: Payload<'_>) -> f64 {
        match payload {
            Payload::Text(text) => substring_similarity(&self.substring, text),
            _ => MISMATCH,
        }
    }

    fn name(&self) -> &'static str {
        "contains"
    }
}

// ************************************************************************************************
// RegexStrategy
// ************************************************************************************************
/// Matches if the regex finds a match anywhere in the body text.
#[derive(Debug, Clone)]
pub struct RegexStrategy {
    regex: BodyRegex,
}

impl RegexStrategy {
    pub fn new<R: Into<BodyRegex>>(regex: R) -> Self {
        Self {
            regex: regex.into(),
        }
    }

    pub fn parse(source: &str) -> Result<Self, Error> {
        Ok(Self::new(BodyRegex::try_from(source)?))
    }
}

impl MatchStrategy for RegexStrategy {
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::TextualValue]
    }

    fn test(&self, payload: Payload<'_>) -> f64 {
        match payload {
            Payload::Text(text) => score_from_bool(self.regex.0.is_match(text)),
            _ => MISMATCH,
        }
    }

    fn name(&self) -> &'static str {
        "matches"
    }
}

// ************************************************************************************************
// BinaryEqualToStrategy
// ************************************************************************************************
/// Compares the raw body bytes against the expected bytes.
#[derive(Debug, Clone)]
pub struct BinaryEqualToStrategy {
    expected: BodyBytes,
}

impl BinaryEqualToStrategy {
    pub fn new<B: Into<BodyBytes>>(expected: B) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl MatchStrategy for BinaryEqualToStrategy {
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::ExactValue]
    }

    fn test(&self, payload: Payload<'_>) -> f64 {
        match payload {
            Payload::Bytes(bytes) => bytes_similarity(self.expected.as_ref(), bytes),
            Payload::Text(text) => bytes_similarity(self.expected.as_ref(), text.as_bytes()),
            Payload::Structured(_) => MISMATCH,
        }
    }

    fn name(&self) -> &'static str {
        "binary_equal_to"
    }
}

// ************************************************************************************************
// JsonEqualToStrategy
// ************************************************************************************************
/// An exact JSON expectation.
///
/// Raw bodies match if they are byte-identical to the compact serialization of the
/// expectation or if they parse into an equal JSON value. Parsed bodies are compared
/// as JSON values.
#[derive(Debug, Clone)]
pub struct JsonEqualToStrategy {
    expected: Value,
    serialized: Vec<u8>,
}

impl JsonEqualToStrategy {
    pub fn new(expected: Value) -> Self {
        let serialized = expected.to_string().into_bytes();
        Self {
            expected,
            serialized,
        }
    }

    fn test_bytes(&self, bytes: &[u8]) -> f64 {
        if bytes == self.serialized.as_slice() {
            return score_from_bool(true);
        }

        parse_json(bytes).map_or(MISMATCH, |actual| {
            score_from_bool(json_equals(&self.expected, &actual))
        })
    }
}

impl MatchStrategy for JsonEqualToStrategy {
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::ExactValue, Capability::StructuredValue]
    }

    fn test(&self, payload: Payload<'_>) -> f64 {
        match payload {
            Payload::Structured(actual) => score_from_bool(json_equals(&self.expected, actual)),
            Payload::Bytes(bytes) => self.test_bytes(bytes),
            Payload::Text(text) => self.test_bytes(text.as_bytes()),
        }
    }

    fn name(&self) -> &'static str {
        "equal_to_json"
    }
}

// ************************************************************************************************
// JsonIncludesStrategy
// ************************************************************************************************
/// Matches if the body JSON contains the expected JSON (extra fields are allowed).
#[derive(Debug, Clone)]
pub struct JsonIncludesStrategy {
    expected: Value,
}

impl JsonIncludesStrategy {
    pub fn new(expected: Value) -> Self {
        Self { expected }
    }
}

impl MatchStrategy for JsonIncludesStrategy {
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::StructuredValue]
    }

    fn test(&self, payload: Payload<'_>) -> f64 {
        let parsed;
        let actual = match payload {
            Payload::Structured(actual) => actual,
            Payload::Bytes(bytes) => match parse_json(bytes) {
                Some(value) => {
                    parsed = value;
                    &parsed
                }
                None => return MISMATCH,
            },
            Payload::Text(text) => match parse_json(text.as_bytes()) {
                Some(value) => {
                    parsed = value;
                    &parsed
                }
                None => return MISMATCH,
            },
        };

        score_from_bool(json_includes(&self.expected, actual))
    }

    fn name(&self) -> &'static str {
        "includes_json"
    }
}
