use serde_json::json;
use std::convert::TryFrom;
use stubmatch::{BodyContentMatcher, BodyView, Error, ScoreCard, StaticBodyRequirements};

fn matcher_from_json(source: &str) -> Result<BodyContentMatcher, Error> {
    BodyContentMatcher::try_from(StaticBodyRequirements::from_json(source)?)
}

#[test]
fn json_definition_matches_parsed_and_raw_bodies() {
    let _ = env_logger::try_init();

    let matcher = matcher_from_json(r#"{ "patterns": [ { "equalToJson": { "a": 1 } } ] }"#).unwrap();

    assert_eq!(
        matcher.score(&BodyView::structured(json!({"a": 1}))).unwrap(),
        1.0
    );
    assert_eq!(matcher.score(&BodyView::bytes(&b"{\"a\":1}"[..])).unwrap(), 1.0);
    assert_eq!(matcher.score(&BodyView::text(r#"{"a":1}"#)).unwrap(), 1.0);
    assert_eq!(matcher.score(&BodyView::none()).unwrap(), 0.0);
}

#[test]
fn binary_definition_is_base64() {
    let matcher = matcher_from_json(r#"{ "patterns": [ { "binaryEqualTo": "3q2+7w==" } ] }"#).unwrap();

    let mut card = ScoreCard::new();
    let score = matcher
        .match_request(&BodyView::bytes(vec![0xde, 0xad, 0xbe, 0xef]), &mut card)
        .unwrap();
    assert_eq!(score, 1.0);
    assert!(card.is_exact_match());

    // A textual expectation would not see this body at all, a binary one grades it.
    let partial = matcher
        .score(&BodyView::bytes(vec![0xde, 0xad, 0xbe, 0x00]))
        .unwrap();
    assert_eq!(partial, 0.75);
}

#[test]
fn best_pattern_wins() {
    let matcher = matcher_from_json(
        r#"{
            "patterns": [
                { "equalTo": "hello world" },
                { "wildcard": "hello *" },
                { "matches": "^bye" }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(matcher.score(&BodyView::text("hello there")).unwrap(), 1.0);
    assert_eq!(matcher.score(&BodyView::text("bye")).unwrap(), 1.0);

    // Only the literal pattern grades this body: two edits away from "hello world".
    let partial = matcher.score(&BodyView::text("help world")).unwrap();
    assert!((partial - 9.0 / 11.0).abs() < 1e-9);
}

#[test]
fn configuration_errors_fail_before_scoring() {
    assert!(matches!(
        matcher_from_json(r#"{ "patterns": [] }"#),
        Err(Error::EmptyStrategyList)
    ));
    assert!(matches!(
        matcher_from_json(r#"{ "patterns": [ { "binaryEqualTo": "%%%" } ] }"#),
        Err(Error::JSONConversionError(_))
    ));
    assert!(matches!(
        matcher_from_json(r#"{ "patterns": [ { "unknown": 1 } ] }"#),
        Err(Error::JSONConversionError(_))
    ));
}
