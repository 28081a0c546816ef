// Calendar merger: Unix-seconds keys + ISO-date keys -> one date calendar.
//
// LeetCode reports activity keyed by the Unix timestamp (seconds, as a
// string) of the UTC day start. Codeforces activity is built keyed by
// `YYYY-MM-DD`. Both are normalized to `NaiveDate` here and summed per day.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};

use crate::analytics::models::ActivityCalendar;
use crate::error::AnalyticsError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Merge a timestamp-keyed calendar with a date-keyed calendar.
///
/// Counts landing on the same UTC date are summed. A key that cannot be
/// normalized is an `InvalidCalendarKey` error rather than a silent drop,
/// since a corrupt date would break the ordering of the output.
pub fn merge_calendars(
    timestamp_keyed: &BTreeMap<String, u64>,
    date_keyed: &BTreeMap<String, u64>,
) -> Result<ActivityCalendar, AnalyticsError> {
    let mut merged = ActivityCalendar::new();

    for (key, count) in timestamp_keyed {
        merged.add(parse_timestamp_key(key)?, *count);
    }

    for (key, count) in date_keyed {
        merged.add(parse_date_key(key)?, *count);
    }

    Ok(merged)
}

/// The UTC calendar date a Unix timestamp (seconds) falls on.
pub fn date_for_timestamp(seconds: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}

/// Parse a Unix-seconds string key into its UTC calendar date.
pub fn parse_timestamp_key(key: &str) -> Result<NaiveDate, AnalyticsError> {
    let seconds: i64 = key.parse().map_err(|_| AnalyticsError::InvalidCalendarKey {
        key: key.to_string(),
        reason: "not a Unix timestamp in seconds".to_string(),
    })?;

    date_for_timestamp(seconds).ok_or_else(|| AnalyticsError::InvalidCalendarKey {
        key: key.to_string(),
        reason: "timestamp out of range".to_string(),
    })
}

/// Parse a strict `YYYY-MM-DD` key. Anything that would not format back to
/// the same string (e.g. `2025-1-7`) is rejected so keys pass through
/// unchanged.
pub fn parse_date_key(key: &str) -> Result<NaiveDate, AnalyticsError> {
    let invalid = || AnalyticsError::InvalidCalendarKey {
        key: key.to_string(),
        reason: "not a YYYY-MM-DD date".to_string(),
    };

    let date = NaiveDate::parse_from_str(key, DATE_FORMAT).map_err(|_| invalid())?;
    if date.format(DATE_FORMAT).to_string() != key {
        return Err(invalid());
    }
    Ok(date)
}
