use crate::matchers::strategy::{score_from_bool, EXACT_MATCH, MISMATCH};
use assert_json_diff::{assert_json_matches_no_panic, CompareMode, Config};
use serde_json::Value;

/// Values longer than this are not graded: a mismatch scores 0.0 instead of running a
/// quadratic edit distance or common substring search on the request path.
pub const MAX_GRADED_LEN: usize = 1024;

// *************************************************************************************************
// Similarity
// *************************************************************************************************
pub fn distance_for<T>(expected: &[T], actual: &[T]) -> usize
where
    T: PartialEq + Sized,
{
    stringmetrics::levenshtein_limit_iter(expected.iter(), actual.iter(), u32::MAX) as usize
}

/// Turns an edit distance into a score. Two empty values are equal.
pub fn similarity(distance: usize, expected_len: usize, actual_len: usize) -> f64 {
    let max_len = expected_len.max(actual_len);
    if max_len == 0 {
        return EXACT_MATCH;
    }

    EXACT_MATCH - (distance.min(max_len) as f64 / max_len as f64)
}

pub fn bytes_similarity(expected: &[u8], actual: &[u8]) -> f64 {
    if expected == actual {
        return EXACT_MATCH;
    }

    if expected.len().max(actual.len()) > MAX_GRADED_LEN {
        return MISMATCH;
    }

    similarity(
        distance_for(expected, actual),
        expected.len(),
        actual.len(),
    )
}

pub fn string_similarity(case_sensitive: bool, expected: &str, actual: &str) -> f64 {
    if expected.len().max(actual.len()) > MAX_GRADED_LEN {
        let equal = if case_sensitive {
            expected == actual
        } else {
            expected.to_lowercase() == actual.to_lowercase()
        };
        return score_from_bool(equal);
    }

    let (expected, actual): (Vec<char>, Vec<char>) = if case_sensitive {
        (expected.chars().collect(), actual.chars().collect())
    } else {
        (
            expected.to_lowercase().chars().collect(),
            actual.to_lowercase().chars().collect(),
        )
    };

    if expected == actual {
        return EXACT_MATCH;
    }

    similarity(
        distance_for(&expected, &actual),
        expected.len(),
        actual.len(),
    )
}

pub fn longest_common_substring(s1: &str, s2: &str) -> usize {
    let (long_s, short_s) = if s1.chars().count() < s2.chars().count() {
        (s2, s1)
    } else {
        (s1, s2)
    };

    let short_chars: Vec<char> = short_s.chars().collect();
    let mut previous = vec![0; short_chars.len() + 1];
    let mut current = vec![0; short_chars.len() + 1];
    let mut longest = 0;

    for long_char in long_s.chars() {
        for (j, short_char) in short_chars.iter().enumerate() {
            if long_char == *short_char {
                current[j + 1] = previous[j] + 1;
                longest = longest.max(current[j + 1]);
            } else {
                current[j + 1] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    longest
}

/// Share of `expected` that was found as one contiguous piece of `actual`.
pub fn substring_similarity(expected: &str, actual: &str) -> f64 {
    if actual.contains(expected) {
        return EXACT_MATCH;
    }

    if expected.len().max(actual.len()) > MAX_GRADED_LEN {
        return MISMATCH;
    }

    let expected_len = expected.chars().count();
    let lcs = longest_common_substring(expected, actual);

    // The expectation is not contained, so lcs < expected_len and this stays below 1.0.
    lcs as f64 / expected_len as f64
}

// *************************************************************************************************
// Wildcards
// *************************************************************************************************
/// Translates a wildcard pattern (`*` = any sequence, `?` = any single character) into an
/// anchored regular expression source.
pub fn wildcard_to_regex(pattern: &str) -> String {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push_str("(?s)^");

    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                source.push_str(&regex::escape(&literal));
                literal.clear();
                source.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }

    source.push_str(&regex::escape(&literal));
    source.push('$');
    source
}

// *************************************************************************************************
// JSON
// *************************************************************************************************
pub fn parse_json(bytes: &[u8]) -> Option<Value> {
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Cannot parse json value: {}", e);
            None
        }
    }
}

pub fn json_equals(expected: &Value, actual: &Value) -> bool {
    assert_json_matches_no_panic(actual, expected, Config::new(CompareMode::Strict)).is_ok()
}

pub fn json_includes(expected: &Value, actual: &Value) -> bool {
    assert_json_matches_no_panic(actual, expected, Config::new(CompareMode::Inclusive)).is_ok()
}

#[cfg(test)]
mod test {
    use super::*;
    use regex::Regex;
    use serde_json::json;

    #[test]
    fn distance_for_chars() {
        let a: Vec<char> = "kitten".chars().collect();
        let b: Vec<char> = "sitting".chars().collect();
        assert_eq!(distance_for(&a, &b), 3);
    }

    #[test]
    fn similarity_bounds() {
        assert_eq!(similarity(0, 0, 0), 1.0);
        assert_eq!(similarity(4, 4, 2), 0.0);
        assert_eq!(similarity(1, 4, 4), 0.75);
    }

    #[test]
    fn string_similarity_case() {
        assert_eq!(string_similarity(true, "abc", "abc"), 1.0);
        assert_eq!(string_similarity(false, "ABC", "abc"), 1.0);
        assert!(string_similarity(true, "ABC", "abc") < 1.0);
        assert_eq!(string_similarity(true, "abcd", "abcx"), 0.75);
        assert_eq!(string_similarity(true, "", "abc"), 0.0);
    }

    #[test]
    fn bytes_similarity_grades() {
        assert_eq!(bytes_similarity(b"abcd", b"abcd"), 1.0);
        assert_eq!(bytes_similarity(b"abcd", b"abce"), 0.75);
        assert_eq!(bytes_similarity(b"abcd", b""), 0.0);
    }

    #[test]
    fn large_values_are_not_graded() {
        let expected = vec![b'a'; 1_000_000];
        let mut actual = expected.clone();
        actual[999_999] = b'b';
        assert_eq!(bytes_similarity(&expected, &actual), 0.0);
        assert_eq!(bytes_similarity(&expected, &expected.clone()), 1.0);

        let expected = "a".repeat(1_000_000);
        let actual = format!("{}b", "a".repeat(999_999));
        assert_eq!(string_similarity(true, &expected, &actual), 0.0);
        assert_eq!(string_similarity(false, &expected, &expected.to_uppercase()), 1.0);

        assert_eq!(substring_similarity("needle", &"x".repeat(1_000_000)), 0.0);
        assert_eq!(
            substring_similarity("needle", &format!("{}needle", "x".repeat(1_000_000))),
            1.0
        );
    }

    #[test]
    fn values_at_the_limit_are_graded() {
        let expected = vec![b'a'; MAX_GRADED_LEN];
        let mut actual = expected.clone();
        actual[0] = b'b';
        let score = bytes_similarity(&expected, &actual);
        assert!(score > 0.99 && score < 1.0);
    }

    #[test]
    fn lcs() {
        assert_eq!(longest_common_substring("Hello", "Hello World"), 5);
        assert_eq!(longest_common_substring("abc", "xyz"), 0);
        assert_eq!(longest_common_substring("", "xyz"), 0);
    }

    #[test]
    fn substring_similarity_grades() {
        assert_eq!(substring_similarity("World", "Hello World"), 1.0);
        assert_eq!(substring_similarity("", "anything"), 1.0);
        assert_eq!(substring_similarity("Worlds", "Hello World"), 5.0 / 6.0);
        assert_eq!(substring_similarity("xyz", "Hello"), 0.0);
    }

    #[test]
    fn wildcard_translation() {
        let re = Regex::new(&wildcard_to_regex("a*c?.txt")).unwrap();
        assert!(re.is_match("abbbcd.txt"));
        assert!(re.is_match("acd.txt"));
        assert!(!re.is_match("abbbc.txt"));
        assert!(!re.is_match("xacd.txt"));

        let re = Regex::new(&wildcard_to_regex("1+1=(2)")).unwrap();
        assert!(re.is_match("1+1=(2)"));
        assert!(!re.is_match("11=2"));
    }

    #[test]
    fn json_comparisons() {
        let expected = json!({"a": 1});
        assert!(json_equals(&expected, &json!({"a": 1})));
        assert!(!json_equals(&expected, &json!({"a": 1, "b": 2})));
        assert!(json_includes(&expected, &json!({"a": 1, "b": 2})));
        assert!(!json_includes(&json!({"a": 1, "b": 2}), &expected));
    }

    #[test]
    fn parse_json_rejects_garbage() {
        assert_eq!(parse_json(br#"{"a":1}"#), Some(json!({"a": 1})));
        assert_eq!(parse_json(b"{not json"), None);
    }
}
