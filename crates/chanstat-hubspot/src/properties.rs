//! Internal names of the contact properties read and written by the sync.

/// Free-text channel handle, URL or ID entered on the contact.
pub const CHANNEL_IDENTIFIER: &str = "youtube_handle";

/// Rounded 30-day average view count (HubSpot number property).
pub const AVERAGE_VIEWS: &str = "youtube_video_average_views";

/// When [`AVERAGE_VIEWS`] was last written.
pub const LAST_UPDATED: &str = "last_updated_youtube_video_average_views";

pub const FIRST_NAME: &str = "firstname";
pub const LAST_NAME: &str = "lastname";
pub const EMAIL: &str = "email";

/// Properties requested on every contact search.
pub const SEARCH_PROPERTIES: [&str; 6] = [
    AVERAGE_VIEWS,
    LAST_UPDATED,
    CHANNEL_IDENTIFIER,
    FIRST_NAME,
    LAST_NAME,
    EMAIL,
];
