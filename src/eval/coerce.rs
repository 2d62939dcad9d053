//! Value coercion shared by the operator evaluator and the sort comparator

use crate::core::field::{FilterValue, format_number};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Display form of a JSON value, used for substring matching and string ordering
///
/// Arrays are joined with `,`; integral numbers have no trailing `.0`.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(display_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Numeric reading of a JSON value, parsing numeric strings
pub fn value_as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => return None,
    };
    (!n.is_nan()).then_some(n)
}

/// Parse a date or datetime string
///
/// Accepts RFC 3339, naive ISO datetimes (taken as UTC) and plain
/// `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Timestamp reading of a JSON value
///
/// Strings are parsed with [`parse_datetime`]; numbers are epoch milliseconds.
pub fn value_as_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_datetime(s),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// Timestamp reading of a filter value
pub fn filter_as_datetime(value: &FilterValue) -> Option<DateTime<Utc>> {
    match value {
        FilterValue::Str(s) => parse_datetime(s),
        FilterValue::Num(n) => DateTime::from_timestamp_millis(*n as i64),
        _ => None,
    }
}

/// Start of the day `raw` falls on
pub fn start_of_day(raw: &str) -> Option<DateTime<Utc>> {
    let date = parse_datetime(raw)?.date_naive();
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

/// Last millisecond of the day `raw` falls on (`23:59:59.999`)
pub fn end_of_day(raw: &str) -> Option<DateTime<Utc>> {
    let date = parse_datetime(raw)?.date_naive();
    date.and_hms_milli_opt(23, 59, 59, 999).map(|naive| naive.and_utc())
}
