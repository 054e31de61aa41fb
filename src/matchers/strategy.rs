use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

/// Score of a full match.
pub const EXACT_MATCH: f64 = 1.0;

/// Score of a mismatch.
pub const MISMATCH: f64 = 0.0;

/// Declares which payload kind(s) a [MatchStrategy] is able to evaluate.
///
/// The declaration order is also the order in which capabilities are tried when a
/// strategy is resolved against a body (see [crate::matchers::resolution]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Tests whether a body is there at all.
    Presence,
    /// Tests a literal value against the raw bytes of a body.
    ExactValue,
    /// Tests against the parsed tree of a body (or its bytes, if it was not parsed).
    StructuredValue,
    /// Tests against the text of a body.
    TextualValue,
}

/// A single body payload handed to [MatchStrategy::test].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
    Structured(&'a Value),
}

/// A configured, capability-tagged unit that grades how well a payload satisfies an
/// expectation.
///
/// Implementations must be pure: the score may only depend on the payload and on the
/// strategy's own (immutable) configuration.
pub trait MatchStrategy: Debug + Send + Sync {
    /// The capabilities this strategy carries. Must not change over the lifetime of the
    /// strategy.
    fn capabilities(&self) -> &'static [Capability];

    /// Grades the payload. The returned value is expected to lie in `[0.0, 1.0]`,
    /// values outside of that range are clamped by the caller.
    fn test(&self, payload: Payload<'_>) -> f64;

    /// A short name used in log output.
    fn name(&self) -> &'static str;

    fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

#[inline]
pub fn score_from_bool(value: bool) -> f64 {
    if value {
        EXACT_MATCH
    } else {
        MISMATCH
    }
}

/// Forces a score into `[0.0, 1.0]`. `NaN` is treated as a mismatch.
#[inline]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MISMATCH;
    }

    score.clamp(MISMATCH, EXACT_MATCH)
}
