//! `stubmatch` grades how well the body of an HTTP request satisfies the body
//! expectation of a stub. It is the body matching core of a request stubbing tool: the
//! surrounding mock server computes scores for method, path, headers and query, and
//! `stubmatch` contributes the score for the body.
//!
//! # Body views
//! The request pipeline detects what kind of body it received and hands it over as a
//! [BodyView]. A view exposes the body as text, bytes and/or a parsed JSON tree,
//! depending on its [BodyKind].
//!
//! # Matchers
//! A [BodyContentMatcher] holds exactly one of the following configurations:
//! * a non-empty list of [MatchStrategy] values (the best scoring strategy wins),
//! * a predicate over the body text, the parsed body, the body bytes or the whole view.
//!
//! Strategies carry [Capability] tags. When a strategy is scored against a body, its
//! capabilities are tried in the order `Presence`, `ExactValue`, `StructuredValue`,
//! `TextualValue`, and the first one that is applicable to the body kind decides the
//! score (see [matchers::resolution]).
//!
//! ```
//! use serde_json::json;
//! use stubmatch::{BodyContentMatcher, BodyView, ScoreCard};
//!
//! let matcher = BodyContentMatcher::json_equal_to(json!({"a": 1}));
//!
//! // Raw bytes are compared against the serialized expectation ...
//! assert_eq!(matcher.score(&BodyView::bytes(&b"{\"a\":1}"[..])).unwrap(), 1.0);
//!
//! // ... while parsed bodies are compared as JSON values.
//! let mut card = ScoreCard::new();
//! matcher
//!     .match_request(&BodyView::structured(json!({"a": 1})), &mut card)
//!     .unwrap();
//! assert_eq!(card.get("body"), Some(1.0));
//! ```
//!
//! # Stub definitions
//! Body expectations can also be read from JSON (or, with the `yaml` feature, YAML)
//! stub definitions, see [definition::StaticBodyRequirements].
mod common;
pub mod definition;
pub mod matchers;

pub use common::{
    data::{BodyKind, BodyRegex, BodyView, Error, PredicateError},
    util::BodyBytes,
};
pub use definition::{BodyPatternDefinition, StaticBodyRequirements};
pub use matchers::{
    aggregate::{RequestBody, ScoreAggregator, ScoreCard, BODY_COMPONENT},
    body::{BodyContentMatcher, BodyMatchConfig},
    resolution::resolve_strategy_score,
    strategies::{
        BinaryEqualToStrategy, ContainsStrategy, EqualToStrategy, JsonEqualToStrategy,
        JsonIncludesStrategy, PresenceStrategy, RegexStrategy,
    },
    strategy::{Capability, MatchStrategy, Payload, EXACT_MATCH, MISMATCH},
};
