//! Staleness checks for the last-updated contact property.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a CRM date or datetime value.
///
/// Accepts RFC 3339 timestamps, naive datetimes (read as UTC), plain
/// `YYYY-MM-DD` dates (midnight UTC) and epoch milliseconds, which is what
/// HubSpot returns for date properties in older portals.
#[must_use]
pub fn parse_crm_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    if value.bytes().all(|b| b.is_ascii_digit()) {
        return value
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis);
    }
    None
}

/// `true` when `value` is missing, unparseable, or strictly older than
/// `now - stale_days`. A value exactly at the cutoff is fresh.
///
/// When `now - stale_days` falls before the earliest representable time, no
/// parseable value is stale.
#[must_use]
pub fn is_stale_or_missing(value: Option<&str>, now: DateTime<Utc>, stale_days: i64) -> bool {
    let Some(updated_at) = value.and_then(parse_crm_timestamp) else {
        return true;
    };
    let cutoff = TimeDelta::try_days(stale_days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    updated_at < cutoff
}

/// Today's date at midnight UTC, formatted `YYYY-MM-DDT00:00:00Z`.
#[must_use]
pub fn midnight_utc_iso(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT00:00:00Z").to_string()
}
