//! Timestamp helpers for the Early API.
//!
//! The API expects ISO 8601 with millisecond precision and no zone suffix,
//! e.g. `2025-01-15T09:00:00.000`. All times are UTC.

use crate::error::{EarlyError, EarlyResult};
use chrono::{NaiveDate, NaiveDateTime, Utc};

const API_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Normalize a caller-supplied timestamp to API format.
///
/// Accepts `YYYY-MM-DD` (expanded to midnight) or
/// `YYYY-MM-DDTHH:MM:SS` with an optional fractional part. Anything else
/// is rejected as [`EarlyError::InvalidInput`].
pub fn to_api_timestamp(input: &str) -> EarlyResult<String> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(format!("{}T00:00:00.000", date.format("%Y-%m-%d")));
    }

    if let Ok(datetime) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.format(API_FORMAT).to_string());
    }

    Err(EarlyError::InvalidInput(format!(
        "expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, got '{input}'"
    )))
}

/// Current UTC time in API format.
pub fn now_api_timestamp() -> String {
    Utc::now().format(API_FORMAT).to_string()
}

/// Expand a `YYYY-MM-DD` date to the last millisecond of that day.
pub fn end_of_day_timestamp(input: &str) -> EarlyResult<String> {
    let input = input.trim();
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        EarlyError::InvalidInput(format!("expected YYYY-MM-DD, got '{input}'"))
    })?;
    Ok(format!("{}T23:59:59.999", date.format("%Y-%m-%d")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_expands_to_midnight() {
        assert_eq!(
            to_api_timestamp("2025-01-15").unwrap(),
            "2025-01-15T00:00:00.000"
        );
    }

    #[test]
    fn test_datetime_without_fraction_gains_millis() {
        assert_eq!(
            to_api_timestamp("2025-01-15T09:30:00").unwrap(),
            "2025-01-15T09:30:00.000"
        );
    }

    #[test]
    fn test_datetime_with_fraction_is_normalized() {
        assert_eq!(
            to_api_timestamp("2025-01-15T09:30:00.5").unwrap(),
            "2025-01-15T09:30:00.500"
        );
        assert_eq!(
            to_api_timestamp("2025-01-15T09:30:00.123").unwrap(),
            "2025-01-15T09:30:00.123"
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(
            to_api_timestamp("  2025-01-15  ").unwrap(),
            "2025-01-15T00:00:00.000"
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(to_api_timestamp("yesterday").is_err());
        assert!(to_api_timestamp("2025-13-40").is_err());
        assert!(to_api_timestamp("").is_err());
    }

    #[test]
    fn test_end_of_day() {
        assert_eq!(
            end_of_day_timestamp("2025-01-15").unwrap(),
            "2025-01-15T23:59:59.999"
        );
        assert!(end_of_day_timestamp("2025-01-15T09:00:00").is_err());
    }

    #[test]
    fn test_now_matches_api_format() {
        let now = now_api_timestamp();
        // e.g. 2025-01-15T09:30:00.123
        assert_eq!(now.len(), 23);
        assert_eq!(&now[10..11], "T");
        assert_eq!(&now[19..20], ".");
    }
}
