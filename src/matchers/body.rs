use crate::{
    common::{
        data::{BodyView, Error, PredicateError},
        util::BodyBytes,
    },
    matchers::{
        aggregate::{RequestBody, ScoreAggregator, BODY_COMPONENT},
        resolution::resolve_strategy_score,
        strategies::{BinaryEqualToStrategy, EqualToStrategy, JsonEqualToStrategy},
        strategy::{score_from_bool, MatchStrategy, MISMATCH},
    },
};
use serde_json::Value;
use std::{fmt, sync::Arc};

pub type TextPredicate =
    Arc<dyn Fn(Option<&str>) -> Result<bool, PredicateError> + Send + Sync>;
pub type StructuredPredicate =
    Arc<dyn Fn(Option<&Value>) -> Result<bool, PredicateError> + Send + Sync>;
pub type BytesPredicate =
    Arc<dyn Fn(Option<&[u8]>) -> Result<bool, PredicateError> + Send + Sync>;
pub type ViewPredicate =
    Arc<dyn Fn(Option<&BodyView>) -> Result<bool, PredicateError> + Send + Sync>;

/// The configuration of a [BodyContentMatcher]. Exactly one mode is active.
#[derive(Clone)]
pub enum BodyMatchConfig {
    StrategyList(Vec<Arc<dyn MatchStrategy>>),
    TextPredicate(TextPredicate),
    StructuredPredicate(StructuredPredicate),
    BytesPredicate(BytesPredicate),
    ViewPredicate(ViewPredicate),
}

impl fmt::Debug for BodyMatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyMatchConfig::StrategyList(strategies) => {
                f.debug_tuple("StrategyList").field(strategies).finish()
            }
            BodyMatchConfig::TextPredicate(_) => f.write_str("TextPredicate(..)"),
            BodyMatchConfig::StructuredPredicate(_) => f.write_str("StructuredPredicate(..)"),
            BodyMatchConfig::BytesPredicate(_) => f.write_str("BytesPredicate(..)"),
            BodyMatchConfig::ViewPredicate(_) => f.write_str("ViewPredicate(..)"),
        }
    }
}

/// Grades how well an observed request body satisfies a configured body expectation.
///
/// A matcher is built once when a stub is registered and is then shared read-only
/// between all requests that are matched against that stub. Scoring never mutates the
/// matcher, so it can be called concurrently without synchronization.
///
/// ```
/// use stubmatch::{BodyContentMatcher, BodyView};
///
/// let matcher = BodyContentMatcher::equal_to("ping");
/// assert_eq!(matcher.score(&BodyView::text("ping")).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct BodyContentMatcher {
    config: BodyMatchConfig,
}

impl BodyContentMatcher {
    /// Matches with the best scoring strategy of a non-empty list.
    pub fn strategies(strategies: Vec<Arc<dyn MatchStrategy>>) -> Result<Self, Error> {
        if strategies.is_empty() {
            return Err(Error::EmptyStrategyList);
        }

        tracing::debug!(
            "Creating body matcher with strategies {:?}",
            strategies.iter().map(|s| s.name()).collect::<Vec<_>>()
        );

        Ok(Self {
            config: BodyMatchConfig::StrategyList(strategies),
        })
    }

    pub fn strategy<S: MatchStrategy + 'static>(strategy: S) -> Self {
        let strategy: Arc<dyn MatchStrategy> = Arc::new(strategy);
        Self {
            config: BodyMatchConfig::StrategyList(vec![strategy]),
        }
    }

    /// Expects the body text to equal `text`.
    pub fn equal_to<T: Into<String>>(text: T) -> Self {
        Self::strategy(EqualToStrategy::literal(text))
    }

    /// Expects the body text to match a wildcard pattern (`*` and `?`).
    pub fn wildcard<T: Into<String>>(pattern: T) -> Result<Self, Error> {
        Ok(Self::strategy(EqualToStrategy::wildcard(pattern)?))
    }

    /// Expects the raw body to equal `bytes`.
    pub fn binary_equal_to<B: Into<BodyBytes>>(bytes: B) -> Self {
        Self::strategy(BinaryEqualToStrategy::new(bytes))
    }

    /// Expects the body to equal `value`, either byte for byte or as parsed JSON.
    pub fn json_equal_to(value: Value) -> Self {
        Self::strategy(JsonEqualToStrategy::new(value))
    }

    pub fn text_predicate<F>(predicate: F) -> Self
    where
        F: Fn(Option<&str>) -> bool + Send + Sync + 'static,
    {
        Self::try_text_predicate(move |text: Option<&str>| Ok(predicate(text)))
    }

    /// Like [BodyContentMatcher::text_predicate], but the predicate may fail. A failure
    /// is returned from [BodyContentMatcher::score] as [Error::PredicateFailed].
    pub fn try_text_predicate<F>(predicate: F) -> Self
    where
        F: Fn(Option<&str>) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Self {
            config: BodyMatchConfig::TextPredicate(Arc::new(predicate)),
        }
    }

    pub fn structured_predicate<F>(predicate: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self::try_structured_predicate(move |value: Option<&Value>| Ok(predicate(value)))
    }

    pub fn try_structured_predicate<F>(predicate: F) -> Self
    where
        F: Fn(Option<&Value>) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Self {
            config: BodyMatchConfig::StructuredPredicate(Arc::new(predicate)),
        }
    }

    pub fn bytes_predicate<F>(predicate: F) -> Self
    where
        F: Fn(Option<&[u8]>) -> bool + Send + Sync + 'static,
    {
        Self::try_bytes_predicate(move |bytes: Option<&[u8]>| Ok(predicate(bytes)))
    }

    pub fn try_bytes_predicate<F>(predicate: F) -> Self
    where
        F: Fn(Option<&[u8]>) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Self {
            config: BodyMatchConfig::BytesPredicate(Arc::new(predicate)),
        }
    }

    pub fn view_predicate<F>(predicate: F) -> Self
    where
        F: Fn(Option<&BodyView>) -> bool + Send + Sync + 'static,
    {
        Self::try_view_predicate(move |view: Option<&BodyView>| Ok(predicate(view)))
    }

    pub fn try_view_predicate<F>(predicate: F) -> Self
    where
        F: Fn(Option<&BodyView>) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Self {
            config: BodyMatchConfig::ViewPredicate(Arc::new(predicate)),
        }
    }

    pub fn config(&self) -> &BodyMatchConfig {
        &self.config
    }

    /// Scores the body of `request` in `[0.0, 1.0]`.
    ///
    /// Strategy lists score the maximum of their strategies. Predicates score `1.0` if
    /// they return `true` and `0.0` otherwise. Errors returned by predicates are passed
    /// on unchanged.
    pub fn score<R>(&self, request: &R) -> Result<f64, Error>
    where
        R: RequestBody + ?Sized,
    {
        let view = request.body_view();

        let score = match &self.config {
            BodyMatchConfig::StrategyList(strategies) => strategies
                .iter()
                .map(|strategy| resolve_strategy_score(strategy.as_ref(), view))
                .reduce(f64::max)
                .unwrap_or(MISMATCH),
            BodyMatchConfig::TextPredicate(predicate) => {
                run_predicate(predicate(view.and_then(BodyView::as_text)))?
            }
            BodyMatchConfig::StructuredPredicate(predicate) => {
                run_predicate(predicate(view.and_then(BodyView::as_structured)))?
            }
            BodyMatchConfig::BytesPredicate(predicate) => {
                run_predicate(predicate(view.and_then(BodyView::as_bytes)))?
            }
            BodyMatchConfig::ViewPredicate(predicate) => run_predicate(predicate(view))?,
        };

        Ok(score)
    }

    /// Scores the body of `request` and reports the result to `aggregator` under
    /// [BODY_COMPONENT]. Nothing is reported if scoring fails.
    pub fn match_request<R, A>(&self, request: &R, aggregator: &mut A) -> Result<f64, Error>
    where
        R: RequestBody + ?Sized,
        A: ScoreAggregator + ?Sized,
    {
        let score = self.score(request)?;
        aggregator.add_score(BODY_COMPONENT, score);
        Ok(score)
    }
}

fn run_predicate(result: Result<bool, PredicateError>) -> Result<f64, Error> {
    result.map(score_from_bool).map_err(|err| {
        tracing::debug!("Body predicate failed: {}", err);
        Error::PredicateFailed(err)
    })
}
