//! Serializable body expectations, as they appear in stub definition files.
//!
//! ```json
//! {
//!   "patterns": [
//!     { "equalToJson": { "id": 1 } },
//!     { "contains": "\"id\":1" }
//!   ]
//! }
//! ```
use crate::{
    common::{
        data::{BodyRegex, Error},
        util::BodyBytes,
    },
    matchers::{
        body::BodyContentMatcher,
        strategies::{
            BinaryEqualToStrategy, ContainsStrategy, EqualToStrategy, JsonEqualToStrategy,
            JsonIncludesStrategy, PresenceStrategy, RegexStrategy,
        },
        strategy::MatchStrategy,
    },
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{convert::TryFrom, sync::Arc};

/// A single body expectation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum BodyPatternDefinition {
    EqualTo(String),
    EqualToIgnoreCase(String),
    Wildcard(String),
    /// Base64 encoded bytes.
    BinaryEqualTo(BodyBytes),
    EqualToJson(Value),
    IncludesJson(Value),
    Contains(String),
    Matches(BodyRegex),
    Present(bool),
}

impl BodyPatternDefinition {
    /// Builds the strategy this definition describes.
    pub fn into_strategy(self) -> Result<Arc<dyn MatchStrategy>, Error> {
        let strategy: Arc<dyn MatchStrategy> = match self {
            BodyPatternDefinition::EqualTo(text) => Arc::new(EqualToStrategy::literal(text)),
            BodyPatternDefinition::EqualToIgnoreCase(text) => {
                Arc::new(EqualToStrategy::literal_ignore_case(text))
            }
            BodyPatternDefinition::Wildcard(pattern) => {
                Arc::new(EqualToStrategy::wildcard(pattern)?)
            }
            BodyPatternDefinition::BinaryEqualTo(bytes) => {
                Arc::new(BinaryEqualToStrategy::new(bytes))
            }
            BodyPatternDefinition::EqualToJson(value) => Arc::new(JsonEqualToStrategy::new(value)),
            BodyPatternDefinition::IncludesJson(value) => {
                Arc::new(JsonIncludesStrategy::new(value))
            }
            BodyPatternDefinition::Contains(substring) => {
                Arc::new(ContainsStrategy::new(substring))
            }
            BodyPatternDefinition::Matches(regex) => Arc::new(RegexStrategy::new(regex)),
            BodyPatternDefinition::Present(true) => Arc::new(PresenceStrategy::new()),
            BodyPatternDefinition::Present(false) => {
                return Err(Error::InvalidDefinition(
                    "'present' only supports the value true".to_string(),
                ))
            }
        };

        Ok(strategy)
    }
}

/// The body part of a stub definition.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StaticBodyRequirements {
    #[serde(default)]
    pub patterns: Vec<BodyPatternDefinition>,
}

impl StaticBodyRequirements {
    pub fn from_json(source: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads the same structure as [StaticBodyRequirements::from_json] from YAML. Patterns
    /// are written as single-entry mappings (`- equalTo: ping`), not as YAML tags.
    #[cfg(feature = "yaml")]
    pub fn from_yaml(source: &str) -> Result<Self, Error> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(source)
            .map_err(|err| Error::YAMLConversionError(err.to_string()))?;
        let json = serde_json::to_value(yaml)?;
        Ok(serde_json::from_value(json)?)
    }
}

impl TryFrom<StaticBodyRequirements> for BodyContentMatcher {
    type Error = Error;

    fn try_from(value: StaticBodyRequirements) -> Result<Self, Self::Error> {
        let strategies = value
            .patterns
            .into_iter()
            .map(BodyPatternDefinition::into_strategy)
            .collect::<Result<Vec<_>, _>>()?;

        BodyContentMatcher::strategies(strategies)
    }
}
