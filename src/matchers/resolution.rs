//! Resolution of a single [MatchStrategy] against an observed body.
//!
//! Capabilities are evaluated in the fixed order `Presence → ExactValue →
//! StructuredValue → TextualValue`. The first capability the strategy carries that is
//! applicable to the body kind decides the score. Capabilities that are not applicable
//! to the body kind are skipped, so a strategy tagged `ExactValue` and `StructuredValue`
//! falls through to its structured test when the body was parsed into a tree.
//!
//! | capability        | `Text` | `StructuredTree` | `RawBytes` | `None` |
//! |-------------------|--------|------------------|------------|--------|
//! | `Presence`        | text   | text             | bytes      | -      |
//! | `ExactValue`      | bytes  | -                | bytes      | -      |
//! | `StructuredValue` | -      | tree             | bytes      | -      |
//! | `TextualValue`    | text   | text             | -          | -      |
use crate::{
    common::data::{BodyKind, BodyView},
    matchers::strategy::{clamp_score, Capability, MatchStrategy, Payload, MISMATCH},
};

/// Capabilities in the order they are tried.
pub const RESOLUTION_ORDER: [Capability; 4] = [
    Capability::Presence,
    Capability::ExactValue,
    Capability::StructuredValue,
    Capability::TextualValue,
];

/// Whether a capability can be tested against a body of a given kind, and if so, with
/// which payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Applicability<'a> {
    NotApplicable,
    /// The payload may still be absent if the view was built inconsistently.
    Applicable(Option<Payload<'a>>),
}

pub fn applicability(capability: Capability, view: &BodyView) -> Applicability<'_> {
    let text = || view.as_text().map(Payload::Text);
    let bytes = || view.as_bytes().map(Payload::Bytes);
    let structured = || view.as_structured().map(Payload::Structured);

    let payload = match (capability, view.kind()) {
        (_, BodyKind::None) => return Applicability::NotApplicable,

        (Capability::Presence, BodyKind::Text | BodyKind::StructuredTree) => text(),
        (Capability::Presence, BodyKind::RawBytes) => bytes(),

        (Capability::ExactValue, BodyKind::Text | BodyKind::RawBytes) => bytes(),
        (Capability::ExactValue, BodyKind::StructuredTree) => {
            return Applicability::NotApplicable
        }

        (Capability::StructuredValue, BodyKind::StructuredTree) => structured(),
        (Capability::StructuredValue, BodyKind::RawBytes) => bytes(),
        (Capability::StructuredValue, BodyKind::Text) => return Applicability::NotApplicable,

        (Capability::TextualValue, BodyKind::Text | BodyKind::StructuredTree) => text(),
        (Capability::TextualValue, BodyKind::RawBytes) => return Applicability::NotApplicable,
    };

    Applicability::Applicable(payload)
}

/// Scores one strategy against a body. A missing view is treated like a body of kind
/// [BodyKind::None]. Never fails: every inapplicable combination is a mismatch.
pub fn resolve_strategy_score(strategy: &dyn MatchStrategy, view: Option<&BodyView>) -> f64 {
    let view = match view {
        Some(view) => view,
        None => {
            tracing::trace!("No body present, strategy '{}' mismatches", strategy.name());
            return MISMATCH;
        }
    };

    for capability in RESOLUTION_ORDER {
        if !strategy.has_capability(capability) {
            continue;
        }

        match applicability(capability, view) {
            Applicability::NotApplicable => {
                tracing::trace!(
                    "Capability {:?} of strategy '{}' is not applicable to body kind {:?}",
                    capability,
                    strategy.name(),
                    view.kind()
                );
            }
            Applicability::Applicable(None) => {
                tracing::trace!(
                    "Body of kind {:?} has no payload for capability {:?}",
                    view.kind(),
                    capability
                );
                return MISMATCH;
            }
            Applicability::Applicable(Some(payload)) => {
                let score = clamp_score(strategy.test(payload));
                tracing::trace!(
                    "Strategy '{}' scored {} using capability {:?} on body kind {:?}",
                    strategy.name(),
                    score,
                    capability,
                    view.kind()
                );
                return score;
            }
        }
    }

    MISMATCH
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn views() -> Vec<BodyView> {
        vec![
            BodyView::none(),
            BodyView::text("abc"),
            BodyView::structured(json!({"a": 1})),
            BodyView::bytes(vec![1u8, 2, 3]),
        ]
    }

    fn payload_kind(a: Applicability<'_>) -> Option<&'static str> {
        match a {
            Applicability::NotApplicable => None,
            Applicability::Applicable(None) => Some("absent"),
            Applicability::Applicable(Some(Payload::Text(_))) => Some("text"),
            Applicability::Applicable(Some(Payload::Bytes(_))) => Some("bytes"),
            Applicability::Applicable(Some(Payload::Structured(_))) => Some("tree"),
        }
    }

    #[test]
    fn applicability_table() {
        // Columns: None, Text, StructuredTree, RawBytes
        let expected = [
            (Capability::Presence, [None, Some("text"), Some("text"), Some("bytes")]),
            (Capability::ExactValue, [None, Some("bytes"), None, Some("bytes")]),
            (Capability::StructuredValue, [None, None, Some("tree"), Some("bytes")]),
            (Capability::TextualValue, [None, Some("text"), Some("text"), None]),
        ];

        let views = views();
        for (capability, row) in expected {
            for (view, cell) in views.iter().zip(row) {
                assert_eq!(
                    payload_kind(applicability(capability, view)),
                    cell,
                    "capability {:?} on kind {:?}",
                    capability,
                    view.kind()
                );
            }
        }
    }

    #[derive(Debug)]
    struct OutOfRange;

    impl MatchStrategy for OutOfRange {
        fn capabilities(&self) -> &'static [Capability] {
            &[Capability::TextualValue]
        }

        fn test(&self, _: Payload<'_>) -> f64 {
            7.0
        }

        fn name(&self) -> &'static str {
            "out_of_range"
        }
    }

    #[test]
    fn scores_are_clamped() {
        assert_eq!(
            resolve_strategy_score(&OutOfRange, Some(&BodyView::text("x"))),
            1.0
        );
    }

    #[test]
    fn missing_view_mismatches() {
        assert_eq!(resolve_strategy_score(&OutOfRange, None), 0.0);
    }
}
