use crate::common::data::BodyView;
use crate::matchers::strategy::EXACT_MATCH;

/// The component identifier under which body scores are reported.
pub const BODY_COMPONENT: &str = "body";

/// Anything that may carry an observed request body.
pub trait RequestBody {
    fn body_view(&self) -> Option<&BodyView>;
}

impl RequestBody for BodyView {
    fn body_view(&self) -> Option<&BodyView> {
        Some(self)
    }
}

impl RequestBody for Option<BodyView> {
    fn body_view(&self) -> Option<&BodyView> {
        self.as_ref()
    }
}

impl<T: RequestBody + ?Sized> RequestBody for &T {
    fn body_view(&self) -> Option<&BodyView> {
        (**self).body_view()
    }
}

/// Receives per-attribute scores (method, path, headers, query, body, ...) of a request
/// matching pipeline.
pub trait ScoreAggregator {
    fn add_score(&mut self, component: &str, score: f64);
}

/// A minimal [ScoreAggregator] that records every reported score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreCard {
    scores: Vec<(String, f64)>,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scores(&self) -> &[(String, f64)] {
        &self.scores
    }

    /// The last score reported for `component`.
    pub fn get(&self, component: &str) -> Option<f64> {
        self.scores
            .iter()
            .rev()
            .find(|(name, _)| name == component)
            .map(|(_, score)| *score)
    }

    /// True if at least one score was reported and all of them are full matches.
    pub fn is_exact_match(&self) -> bool {
        !self.scores.is_empty() && self.scores.iter().all(|(_, score)| *score >= EXACT_MATCH)
    }

    pub fn average(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }

        let sum: f64 = self.scores.iter().map(|(_, score)| score).sum();
        Some(sum / self.scores.len() as f64)
    }
}

impl ScoreAggregator for ScoreCard {
    fn add_score(&mut self, component: &str, score: f64) {
        tracing::trace!("Adding score {} for component '{}'", score, component);
        self.scores.push((component.to_string(), score));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn score_card() {
        let mut card = ScoreCard::new();
        assert_eq!(card.average(), None);
        assert!(!card.is_exact_match());

        card.add_score("method", 1.0);
        card.add_score(BODY_COMPONENT, 0.5);
        assert_eq!(card.get(BODY_COMPONENT), Some(0.5));
        assert_eq!(card.get("path"), None);
        assert_eq!(card.average(), Some(0.75));
        assert!(!card.is_exact_match());

        card.add_score(BODY_COMPONENT, 1.0);
        assert_eq!(card.get(BODY_COMPONENT), Some(1.0));
        assert_eq!(card.scores().len(), 3);
    }

    #[test]
    fn request_body_impls() {
        let view = BodyView::text("x");
        assert_eq!(view.body_view(), Some(&view));
        assert_eq!(None::<BodyView>.body_view(), None);
        assert_eq!((&&view).body_view(), Some(&view));
    }
}
