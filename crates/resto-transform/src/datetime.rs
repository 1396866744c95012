//! Timestamp parsing for order data.
//!
//! Only unambiguous ISO 8601 shapes are accepted. Day/month orderings such as
//! `01/02/2024` are rejected rather than guessed.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a timestamp string.
///
/// Accepted shapes:
/// - `YYYY-MM-DD` (midnight)
/// - `YYYY-MM-DD[T ]HH:MM`
/// - `YYYY-MM-DD[T ]HH:MM:SS[.fff]`
/// - RFC 3339 with an offset, converted to UTC
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_naive(trimmed)
        .or_else(|| try_parse_offset(trimmed))
        .or_else(|| try_parse_date(trimmed).map(|d| d.and_time(NaiveTime::MIN)))
}

fn try_parse_naive(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_offset(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_utc())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_date_only_as_midnight() {
        assert_eq!(parse_timestamp("2024-01-03"), Some(ts(2024, 1, 3, 0, 0, 0)));
    }

    #[test]
    fn parses_both_separators() {
        let expected = ts(2024, 1, 3, 12, 30, 0);
        assert_eq!(parse_timestamp("2024-01-03T12:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-03 12:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-03T12:30"), Some(expected));
        assert_eq!(parse_timestamp(" 2024-01-03 12:30 "), Some(expected));
    }

    #[test]
    fn keeps_fractional_seconds() {
        let parsed = parse_timestamp("2024-01-03T12:30:00.250").unwrap();
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn converts_offsets_to_utc() {
        assert_eq!(
            parse_timestamp("2024-01-03T12:30:00+02:00"),
            Some(ts(2024, 1, 3, 10, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-03T12:30:00Z"),
            Some(ts(2024, 1, 3, 12, 30, 0))
        );
    }

    #[test]
    fn rejects_ambiguous_and_invalid() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("01/02/2024").is_none());
        assert!(parse_timestamp("2024-13-01").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
