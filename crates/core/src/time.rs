//! UTC normalization of feed timestamps.
//!
//! Every timestamp is resolved to UTC explicitly. Values without an offset are read as UTC,
//! never as host local time, so the date buckets do not depend on where the service runs.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::schedule::RawTimestamp;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Years whose dates still format as four-digit `YYYY-MM-DD` keys.
const KEYABLE_YEARS: RangeInclusive<i32> = 0..=9999;

/// Converts a raw feed timestamp into an instant in UTC.
pub trait TimestampNormalizer: Send + Sync {
    /// Returns `None` when the value cannot be interpreted as a timestamp.
    fn normalize(&self, raw: &RawTimestamp) -> Option<DateTime<Utc>>;
}

/// Default normalizer: RFC 3339, offset-less ISO date-times (as UTC), plain ISO dates
/// (midnight UTC) and integer epoch milliseconds. Instants that land outside years
/// 0000 to 9999 in UTC are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcNormalizer;

impl TimestampNormalizer for UtcNormalizer {
    fn normalize(&self, raw: &RawTimestamp) -> Option<DateTime<Utc>> {
        let instant = match raw {
            RawTimestamp::Millis(millis) => Utc.timestamp_millis_opt(*millis).single(),
            RawTimestamp::Text(text) => parse_text(text.trim()),
        }?;

        KEYABLE_YEARS.contains(&instant.year()).then_some(instant)
    }
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DD` of the instant in UTC.
pub fn date_key(instant: &DateTime<Utc>) -> String {
    instant.format(DATE_FORMAT).to_string()
}

/// `HH:MM:SS` of the instant in UTC; sub-second precision is dropped.
pub fn time_of_day(instant: &DateTime<Utc>) -> String {
    instant.format(TIME_FORMAT).to_string()
}

/// True when `value` is a well-formed `YYYY-MM-DD` calendar date.
pub fn is_date_key(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}
