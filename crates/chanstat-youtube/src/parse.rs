//! Lenient field parsers shared by the wire-to-model conversion.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::types::CountValue;

/// Best-effort conversion of a count string to an integer.
///
/// Fallback order:
/// 1. integer parse (`"1234"`),
/// 2. float parse truncated toward zero (`"1234.9"`, `"1e3"`),
/// 3. `0` for anything else, including negatives and non-finite floats.
///
/// Never fails.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn best_effort_count(raw: &str) -> u64 {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return n;
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => f.trunc() as u64,
        _ => 0,
    }
}

impl CountValue {
    /// Applies [`best_effort_count`] to either wire representation.
    #[must_use]
    pub fn to_count(&self) -> u64 {
        match self {
            CountValue::Number(n) => n
                .as_u64()
                .unwrap_or_else(|| best_effort_count(&n.to_string())),
            CountValue::Text(s) => best_effort_count(s),
        }
    }
}

/// Converts an optional wire count into an optional model count.
pub(crate) fn count(value: Option<&CountValue>) -> Option<u64> {
    value.map(CountValue::to_count)
}

/// Parses an API timestamp into UTC.
///
/// Accepts RFC 3339 (`2024-05-01T12:00:00Z`, with or without fractional
/// seconds or an offset) and a naive `YYYY-MM-DDTHH:MM:SS` assumed to be UTC.
/// Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
