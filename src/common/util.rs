use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A wrapper around `bytes::Bytes` used for binary body expectations.
///
/// Serializes as a base64 string so binary expectations can live in JSON or YAML
/// body definitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BodyBytes(pub Bytes);

impl BodyBytes {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Bytes> for BodyBytes {
    fn from(value: Bytes) -> Self {
        BodyBytes(value)
    }
}

impl From<Vec<u8>> for BodyBytes {
    fn from(value: Vec<u8>) -> Self {
        BodyBytes(Bytes::from(value))
    }
}

impl From<&[u8]> for BodyBytes {
    fn from(value: &[u8]) -> Self {
        BodyBytes(Bytes::copy_from_slice(value))
    }
}

impl From<&str> for BodyBytes {
    fn from(value: &str) -> Self {
        BodyBytes(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl AsRef<[u8]> for BodyBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl std::fmt::Display for BodyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(result) => write!(f, "{}", result),
            Err(_) => write!(f, "{}", STANDARD.encode(&self.0)),
        }
    }
}

impl Serialize for BodyBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for BodyBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map(BodyBytes::from)
            .map_err(serde::de::Error::custom)
    }
}
