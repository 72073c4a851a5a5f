//! Conversion between date tokens and millisecond timestamps. All dates are UTC.

use super::whitespace::is_all_digits;
use chrono::{DateTime, NaiveDate, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalises a `{date:…}` value to epoch milliseconds.
///
/// Digit strings of 10 or more characters are taken as milliseconds already.
/// Calendar dates and RFC 3339 date-times are converted. Anything else is
/// returned unchanged.
pub fn parse_timestamp(input: &str) -> String {
    let input = input.trim();
    if input.len() >= 10 && is_all_digits(input) {
        return input.to_string();
    }
    if let Some(midnight) = NaiveDate::parse_from_str(input, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return midnight.and_utc().timestamp_millis().to_string();
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return datetime.timestamp_millis().to_string();
    }
    tracing::debug!(value = input, "date value is not a timestamp, keeping it verbatim");
    input.to_string()
}

/// Formats epoch milliseconds as `YYYY-MM-DD`; other input is returned unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    let timestamp = timestamp.trim();
    timestamp
        .parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|datetime| datetime.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
