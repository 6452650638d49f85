//! Offset/limit pagination over an ordered collection.
//!
//! Query values arrive as untyped strings. Anything that does not start with
//! an integer is treated as "not provided", and non-positive values fall back
//! to the defaults: offset 0 and no limit.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_INT: Regex = Regex::new(r"^\s*([+-]?\d+)").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationRequest {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationRequest {
    pub fn parse(raw_limit: Option<&str>, raw_offset: Option<&str>) -> Self {
        Self {
            limit: raw_limit.and_then(parse_leading_int),
            offset: raw_offset.and_then(parse_leading_int),
        }
    }

    pub fn effective_offset(&self) -> usize {
        positive(self.offset).unwrap_or(0)
    }

    pub fn effective_limit(&self, total: usize) -> usize {
        positive(self.limit).unwrap_or(total)
    }

    /// Returns the window of `records` this request selects.
    pub fn apply<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        let start = self.effective_offset().min(records.len());
        let remaining = &records[start..];
        let len = self.effective_limit(records.len()).min(remaining.len());
        &remaining[..len]
    }
}

/// Selects the page of `records` described by the raw `limit` and `offset`
/// query values. Each value is parsed on its own, so an unusable one only
/// falls back to its own default.
pub fn resolve<'a, T>(
    records: &'a [T],
    raw_limit: Option<&str>,
    raw_offset: Option<&str>,
) -> &'a [T] {
    PaginationRequest::parse(raw_limit, raw_offset).apply(records)
}

/// Reads the integer at the start of `raw`, ignoring leading whitespace and
/// any trailing characters. Values outside `i64` saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let digits = LEADING_INT.captures(raw)?.get(1)?.as_str();
    match digits.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) if digits.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

fn positive(value: Option<i64>) -> Option<usize> {
    value
        .filter(|v| *v > 0)
        .map(|v| usize::try_from(v).unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<&'static str> {
        vec!["john", "jane", "bob"]
    }

    #[test]
    fn test_absent_params_return_everything() {
        let records = users();
        assert_eq!(resolve(&records, None, None), &["john", "jane", "bob"]);
    }

    #[test]
    fn test_zero_is_treated_as_absent() {
        let records = users();
        assert_eq!(resolve(&records, Some("0"), Some("0")), &["john", "jane", "bob"]);
    }

    #[test]
    fn test_limit_and_offset() {
        let records = users();
        assert_eq!(resolve(&records, Some("2"), Some("1")), &["jane", "bob"]);
        assert_eq!(resolve(&records, Some("1"), Some("1")), &["jane"]);
        assert_eq!(resolve(&records, Some("1"), None), &["john"]);
        assert_eq!(resolve(&records, None, Some("2")), &["bob"]);
        assert_eq!(resolve(&records, Some("10"), Some("1")), &["jane", "bob"]);
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let records = users();
        for offset in ["3", "4", "100", "9223372036854775807", "99999999999999999999"] {
            assert!(resolve(&records, None, Some(offset)).is_empty(), "offset {}", offset);
            assert!(resolve(&records, Some("2"), Some(offset)).is_empty(), "offset {}", offset);
        }
    }

    #[test]
    fn test_non_numeric_behaves_as_absent() {
        let records = users();
        assert_eq!(resolve(&records, Some("abc"), Some("xyz")), &["john", "jane", "bob"]);
        assert_eq!(resolve(&records, Some(""), Some("")), &["john", "jane", "bob"]);
        assert_eq!(resolve(&records, Some("two"), Some("1")), &["jane", "bob"]);
    }

    #[test]
    fn test_negative_values_fall_back_to_defaults() {
        let records = users();
        assert_eq!(resolve(&records, Some("-1"), Some("-5")), &["john", "jane", "bob"]);
    }

    #[test]
    fn test_leading_int_parsing() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int("-2"), Some(-2));
        assert_eq!(parse_leading_int("2abc"), Some(2));
        assert_eq!(parse_leading_int("1.9"), Some(1));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999"), Some(i64::MIN));
    }

    #[test]
    fn test_parse_distinguishes_zero_from_absent() {
        let zero = PaginationRequest::parse(Some("0"), Some("0"));
        assert_eq!(zero.limit, Some(0));
        assert_eq!(zero.offset, Some(0));

        let absent = PaginationRequest::parse(None, Some("nope"));
        assert_eq!(absent.limit, None);
        assert_eq!(absent.offset, None);

        assert_eq!(zero.effective_offset(), absent.effective_offset());
        assert_eq!(zero.effective_limit(3), 3);
    }

    #[test]
    fn test_one_bad_value_keeps_the_other() {
        let records = users();
        assert_eq!(resolve(&records, Some("1,1"), Some("2")), &["bob"]);
        assert_eq!(resolve(&records, Some("1"), Some("[2]")), &["john"]);
    }

    #[test]
    fn test_resolve_is_repeatable() {
        let records = users();
        let first = resolve(&records, Some("2"), Some("1")).to_vec();
        let second = resolve(&records, Some("2"), Some("1")).to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_collection() {
        let records: Vec<&str> = Vec::new();
        assert!(resolve(&records, Some("2"), Some("1")).is_empty());
        assert!(resolve(&records, None, None).is_empty());
    }
}
