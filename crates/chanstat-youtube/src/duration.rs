//! ISO-8601 video duration parsing.

use std::sync::LazyLock;

use regex::Regex;

/// Matches the `PT#H#M#S` subset the API emits. Anchored at the start only.
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)").expect("valid duration regex")
});

/// Converts an ISO-8601 duration such as `PT1H2M3S` into minutes.
///
/// Hours, minutes and seconds are each optional and default to zero.
/// Empty, malformed or overflowing input yields `0.0` rather than an error.
#[must_use]
pub fn parse_duration_minutes(raw: &str) -> f64 {
    let Some(caps) = DURATION_RE.captures(raw) else {
        return 0.0;
    };

    let component = |idx: usize| -> Option<f64> {
        match caps.get(idx) {
            None => Some(0.0),
            Some(m) => m.as_str().parse::<u32>().ok().map(f64::from),
        }
    };

    match (component(1), component(2), component(3)) {
        (Some(hours), Some(minutes), Some(seconds)) => hours * 60.0 + minutes + seconds / 60.0,
        _ => 0.0,
    }
}
