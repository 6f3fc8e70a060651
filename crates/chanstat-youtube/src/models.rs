//! Public read models built from API responses.
//!
//! Each record is constructed fresh per request. Conversion from the wire
//! types in [`crate::types`] happens only here.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::duration::parse_duration_minutes;
use crate::parse::{count, parse_timestamp};
use crate::types::{
    ChannelItem, CommentThreadItem, PlaylistItem, SearchItem, Thumbnails, VideoItem,
};

/// A resolved channel with its statistics.
#[derive(Debug, Clone, Serialize)]
pub struct Channel {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub custom_url: Option<String>,
    pub thumbnails: Thumbnails,
    pub subscriber_count: Option<u64>,
    pub view_count: Option<u64>,
    pub video_count: Option<u64>,
    pub uploads_playlist_id: Option<String>,
}

impl From<ChannelItem> for Channel {
    fn from(item: ChannelItem) -> Self {
        let uploads_playlist_id = item.uploads_playlist_id().map(str::to_owned);
        let (title, description, custom_url, thumbnails) = match item.snippet {
            Some(s) => (s.title, s.description, s.custom_url, s.thumbnails),
            None => (None, None, None, Thumbnails::new()),
        };
        let stats = item.statistics.as_ref();
        Self {
            id: item.id,
            title,
            description,
            custom_url,
            thumbnails,
            subscriber_count: stats.and_then(|s| count(s.subscriber_count.as_ref())),
            view_count: stats.and_then(|s| count(s.view_count.as_ref())),
            video_count: stats.and_then(|s| count(s.video_count.as_ref())),
            uploads_playlist_id,
        }
    }
}

/// A channel as returned by a search, without statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSummary {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnails: Thumbnails,
}

impl ChannelSummary {
    /// Returns `None` for hits that carry no channel ID.
    #[must_use]
    pub fn from_search_item(item: SearchItem) -> Option<Self> {
        let id = item.channel_id()?.to_owned();
        Some(Self {
            id,
            title: item.snippet.title,
            description: item.snippet.description,
            thumbnails: item.snippet.thumbnails,
        })
    }
}

/// A video, optionally enriched with duration and statistics.
#[derive(Debug, Clone, Serialize)]
pub struct Video {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    /// Raw ISO-8601 duration (`PT4M13S`).
    pub duration: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub thumbnails: Thumbnails,
}

impl Video {
    fn basic(id: String, title: Option<String>, published_at: Option<&str>) -> Self {
        Self {
            id,
            title,
            description: None,
            published_at: published_at.and_then(parse_timestamp),
            duration: None,
            view_count: None,
            like_count: None,
            comment_count: None,
            thumbnails: Thumbnails::new(),
        }
    }

    /// Basic record from an uploads-playlist entry. `None` when the entry
    /// has no video ID (deleted or private uploads).
    #[must_use]
    pub fn from_playlist_item(item: PlaylistItem) -> Option<Self> {
        let id = item.content_details?.video_id?;
        let (title, published_at) = match item.snippet {
            Some(s) => (s.title, s.published_at),
            None => (None, None),
        };
        Some(Self::basic(id, title, published_at.as_deref()))
    }

    /// Basic record from a video search hit.
    #[must_use]
    pub fn from_search_item(item: SearchItem) -> Option<Self> {
        let id = item.id.video_id?;
        Some(Self::basic(
            id,
            item.snippet.title,
            item.snippet.published_at.as_deref(),
        ))
    }

    /// Fills duration, statistics and thumbnails from a `videos` lookup.
    /// Title, description and publish time are only filled when still empty.
    pub fn merge_details(&mut self, details: VideoItem) {
        if let Some(snippet) = details.snippet {
            if self.title.is_none() {
                self.title = snippet.title;
            }
            if self.description.is_none() {
                self.description = snippet.description;
            }
            if self.published_at.is_none() {
                self.published_at = snippet.published_at.as_deref().and_then(parse_timestamp);
            }
            self.thumbnails = snippet.thumbnails;
        }
        self.duration = details.content_details.and_then(|c| c.duration);
        if let Some(stats) = details.statistics {
            self.view_count = count(stats.view_count.as_ref());
            self.like_count = count(stats.like_count.as_ref());
            self.comment_count = count(stats.comment_count.as_ref());
        }
    }

    /// Duration in minutes; a missing or malformed duration counts as zero.
    #[must_use]
    pub fn duration_minutes(&self) -> f64 {
        parse_duration_minutes(self.duration.as_deref().unwrap_or(""))
    }
}

impl From<VideoItem> for Video {
    fn from(item: VideoItem) -> Self {
        let mut video = Self::basic(item.id.clone(), None, None);
        video.merge_details(item);
        video
    }
}

/// Statistics projection returned by
/// [`YoutubeClient::fetch_video_statistics`](crate::YoutubeClient::fetch_video_statistics).
#[derive(Debug, Clone, Serialize)]
pub struct VideoStat {
    pub video_id: String,
    pub published_at: DateTime<Utc>,
    pub duration_minutes: f64,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

/// A top-level comment on a video.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: String,
    pub author: Option<String>,
    pub text: Option<String>,
    pub like_count: Option<u64>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<CommentThreadItem> for Comment {
    fn from(item: CommentThreadItem) -> Self {
        let snippet = item.snippet.top_level_comment.snippet;
        Self {
            id: item.id,
            author: snippet.author_display_name,
            text: snippet.text_display,
            like_count: count(snippet.like_count.as_ref()),
            published_at: snippet.published_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Channel information plus its most recent uploads.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelIntrospection {
    pub channel: Channel,
    pub videos: Vec<Video>,
}
