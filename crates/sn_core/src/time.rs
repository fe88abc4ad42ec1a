//! Timestamp handling for provider-supplied dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-8601 timestamp as the news provider sends it. Offsets are
/// honoured, a trailing `Z` is accepted, and naive values are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = value.strip_suffix('Z').unwrap_or(value);
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Best-effort publication time: a missing or malformed value becomes `now`.
pub fn published_at_or(value: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    match value {
        Some(raw) => parse_timestamp(raw).unwrap_or_else(|| {
            tracing::warn!(published_at = raw, "unparseable publication date, using current time");
            now
        }),
        None => now,
    }
}
