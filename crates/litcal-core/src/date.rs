//! Date normalization for upstream event dates.
//!
//! The upstream API is not consistent about how it sends dates: some calendars
//! carry epoch seconds, others ISO-8601 strings with or without an offset.
//! Everything is reduced to a UTC calendar date here, rendered as
//! `YYYY-MM-DD`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Canonical output format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest formattable year; later dates would not fit `YYYY-MM-DD`.
const MAX_YEAR: i32 = 9999;

/// Date-time layouts that carry an explicit UTC offset (`+hh:mm` or `+hhmm`).
const OFFSET_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

/// Date-time layouts without an offset. These are read as UTC.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Normalizes a raw date value into a `YYYY-MM-DD` string.
///
/// Returns `None` for anything that does not resolve to a valid calendar
/// date. Falsy values (`null`, `false`, `0`, `""`) are treated as absent, so
/// an epoch-zero timestamp yields `None` rather than `1970-01-01`.
pub fn normalize_date(value: &Value) -> Option<String> {
    parse_date_value(value).map(format_date)
}

/// Parses a raw date value into a UTC calendar date.
///
/// Numbers are epoch seconds (not milliseconds); strings are ISO-8601.
pub fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(number) => {
            let seconds = number.as_f64()?;
            if seconds == 0.0 {
                return None;
            }
            from_epoch_seconds(seconds)
        }
        Value::String(text) => parse_iso_date(text),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Converts epoch seconds to a UTC calendar date.
///
/// Fractional seconds are kept down to the millisecond and truncated toward
/// zero, so `1.9` and `1.0` land on the same instant.
pub fn from_epoch_seconds(seconds: f64) -> Option<NaiveDate> {
    let millis = seconds * 1000.0;
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }

    let instant = DateTime::<Utc>::from_timestamp_millis(millis.trunc() as i64)?;
    formattable(instant.date_naive())
}

/// Parses an ISO-8601 date or date-time string into a UTC calendar date.
///
/// Accepts date-only values, date-times with or without fractional seconds,
/// and either a `Z` marker, a numeric offset, or no offset at all.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return formattable(instant.with_timezone(&Utc).date_naive());
    }

    for layout in OFFSET_LAYOUTS {
        if let Ok(instant) = DateTime::parse_from_str(text, layout) {
            return formattable(instant.with_timezone(&Utc).date_naive());
        }
    }

    let naive = text
        .strip_suffix('Z')
        .or_else(|| text.strip_suffix('z'))
        .unwrap_or(text);

    for layout in NAIVE_LAYOUTS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(naive, layout) {
            return formattable(datetime.date());
        }
    }

    NaiveDate::parse_from_str(naive, DATE_FORMAT)
        .ok()
        .and_then(formattable)
}

/// Formats a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn formattable(date: NaiveDate) -> Option<NaiveDate> {
    (0..=MAX_YEAR).contains(&date.year()).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn norm(value: Value) -> Option<String> {
        normalize_date(&value)
    }

    #[test]
    fn epoch_seconds() {
        assert_eq!(norm(json!(1)), Some("1970-01-01".to_string()));
        assert_eq!(norm(json!(1735689600)), Some("2025-01-01".to_string()));
        assert_eq!(norm(json!(1709164800.5)), Some("2024-02-29".to_string()));
        assert_eq!(norm(json!(-86400)), Some("1969-12-31".to_string()));
    }

    #[test]
    fn epoch_zero_is_absent() {
        assert_eq!(norm(json!(0)), None);
        assert_eq!(norm(json!(0.0)), None);
    }

    #[test]
    fn leap_day_timestamp() {
        assert_eq!(norm(json!(1709164800)), Some("2024-02-29".to_string()));
    }

    #[test]
    fn iso_strings() {
        assert_eq!(
            norm(json!("2026-01-01T00:00:00+00:00")),
            Some("2026-01-01".to_string())
        );
        assert_eq!(norm(json!("2026-01-01")), Some("2026-01-01".to_string()));
        assert_eq!(
            norm(json!("2026-03-15T10:20:30.123Z")),
            Some("2026-03-15".to_string())
        );
        assert_eq!(
            norm(json!("2026-03-15T10:20:30")),
            Some("2026-03-15".to_string())
        );
        assert_eq!(
            norm(json!("2026-03-15T10:20Z")),
            Some("2026-03-15".to_string())
        );
        assert_eq!(
            norm(json!("2026-03-15T10:20:30+0000")),
            Some("2026-03-15".to_string())
        );
        assert_eq!(
            norm(json!("  2026-03-15  ")),
            Some("2026-03-15".to_string())
        );
    }

    #[test]
    fn offsets_normalize_to_utc() {
        assert_eq!(
            norm(json!("2026-01-01T00:30:00+02:00")),
            Some("2025-12-31".to_string())
        );
        assert_eq!(
            norm(json!("2025-12-31T23:30:00-05:00")),
            Some("2026-01-01".to_string())
        );
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(norm(json!("not-a-date")), None);
        assert_eq!(norm(json!({})), None);
        assert_eq!(norm(json!([])), None);
        assert_eq!(norm(json!(false)), None);
        assert_eq!(norm(json!(true)), None);
        assert_eq!(norm(json!(null)), None);
        assert_eq!(norm(json!("")), None);
        assert_eq!(norm(json!("1735689600")), None);
    }

    #[test]
    fn leap_years() {
        assert_eq!(norm(json!("2000-02-29")), Some("2000-02-29".to_string()));
        assert_eq!(norm(json!("1900-02-29")), None);
        assert_eq!(norm(json!("2023-02-29")), None);
        assert_eq!(norm(json!("2024-02-29")), Some("2024-02-29".to_string()));
    }

    #[test]
    fn year_range_boundaries() {
        // 9999-12-31T23:59:59Z
        assert_eq!(norm(json!(253402300799_i64)), Some("9999-12-31".to_string()));
        // 10000-01-01T00:00:00Z
        assert_eq!(norm(json!(253402300800_i64)), None);
        assert_eq!(norm(json!("9999-12-31")), Some("9999-12-31".to_string()));
        assert_eq!(norm(json!(1e300)), None);
    }

    #[test]
    fn epoch_days_reparse_to_same_day() {
        let mut seconds: i64 = 86_400;
        while seconds < 253_402_300_799 {
            let expected = DateTime::<Utc>::from_timestamp(seconds, 0)
                .unwrap()
                .date_naive();
            let formatted = norm(json!(seconds)).unwrap();
            assert_eq!(formatted.len(), 10);
            assert_eq!(
                NaiveDate::parse_from_str(&formatted, DATE_FORMAT).unwrap(),
                expected
            );
            seconds += 86_400 * 997 + 3_607;
        }
    }
}
