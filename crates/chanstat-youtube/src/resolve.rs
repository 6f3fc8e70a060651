//! Channel identifier classification.
//!
//! Users hand us channel IDs, `@handles`, bare names and channel URLs. These
//! helpers decide which of those can be used as-is and which need a search.

/// Prefix shared by every canonical channel ID.
pub const CHANNEL_ID_PREFIX: &str = "UC";

/// Canonical IDs are strictly longer than this.
pub const CHANNEL_ID_MIN_EXCLUSIVE_LEN: usize = 20;

/// Returns `true` when `identifier` already has the canonical channel ID shape.
#[must_use]
pub fn is_channel_id(identifier: &str) -> bool {
    identifier.starts_with(CHANNEL_ID_PREFIX) && identifier.len() > CHANNEL_ID_MIN_EXCLUSIVE_LEN
}

/// Returns the last path segment of a URL, ignoring trailing slashes.
///
/// `https://www.youtube.com/@veritasium/` yields `@veritasium`.
#[must_use]
pub fn trailing_path_segment(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// What the client has to do to turn an identifier into a channel ID.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Already canonical; no request needed.
    Direct(&'a str),
    /// Search for this term and take the first channel hit.
    Search(&'a str),
}

/// Classifies a raw identifier (trimmed first).
///
/// URLs are reduced to their trailing path segment, which then goes through
/// the same ID-shape check as any other identifier.
#[must_use]
pub fn classify(identifier: &str) -> Resolution<'_> {
    let identifier = identifier.trim();
    if is_channel_id(identifier) {
        return Resolution::Direct(identifier);
    }
    if identifier.starts_with("http") {
        let segment = trailing_path_segment(identifier);
        if is_channel_id(segment) {
            return Resolution::Direct(segment);
        }
        return Resolution::Search(segment);
    }
    Resolution::Search(identifier)
}
