//! Video listing, lookup, statistics and comment endpoints.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};

use crate::client::{YoutubeClient, COMMENT_PAGE_SIZE, MAX_PAGES, PLAYLIST_PAGE_SIZE};
use crate::error::YoutubeError;
use crate::models::{Comment, Video, VideoStat};
use crate::types::{CommentThreadItem, ListResponse, PlaylistItem, SearchItem, VideoItem};

impl YoutubeClient {
    /// Returns the most recent uploads of a channel, newest first.
    ///
    /// Pages through the uploads playlist (at most 50 per page, never more
    /// than still needed) until `max_results` videos are collected or the
    /// playlist ends, then enriches every video with duration and statistics
    /// from a single `videos` request.
    ///
    /// A channel without an uploads playlist yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::NotFound`] if the identifier cannot be resolved.
    /// - [`YoutubeError::PaginationLimit`] if the playlist never ends.
    /// - [`YoutubeError::Http`] on network failure or non-2xx status.
    /// - [`YoutubeError::Deserialize`] if a response shape is unexpected.
    pub async fn fetch_videos(
        &self,
        identifier: &str,
        max_results: u32,
    ) -> Result<Vec<Video>, YoutubeError> {
        let channel_id = self.resolve_channel_id(identifier).await?;
        let Some(uploads) = self.uploads_playlist_id(&channel_id).await? else {
            tracing::debug!(channel_id = %channel_id, "channel has no uploads playlist");
            return Ok(Vec::new());
        };

        let target = max_results as usize;
        let mut videos: Vec<Video> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_count = 0usize;

        while videos.len() < target {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(YoutubeError::PaginationLimit {
                    endpoint: "playlistItems".to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            let page_size = (target - videos.len()).min(PLAYLIST_PAGE_SIZE).to_string();
            let page: ListResponse<PlaylistItem> = {
                let mut params = vec![
                    ("part", "snippet,contentDetails"),
                    ("playlistId", uploads.as_str()),
                    ("maxResults", page_size.as_str()),
                ];
                if let Some(token) = page_token.as_deref() {
                    params.push(("pageToken", token));
                }
                self.get_json("playlistItems", &params).await?
            };

            videos.extend(page.items.into_iter().filter_map(Video::from_playlist_item));
            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }
        videos.truncate(target);

        tracing::debug!(
            channel_id = %channel_id,
            videos = videos.len(),
            pages = page_count,
            "collected uploads"
        );
        self.attach_details(videos).await
    }

    /// Merges duration, statistics and thumbnails into `videos` using one
    /// comma-joined `videos` request. Order is preserved; videos missing
    /// from the response keep their basic fields.
    async fn attach_details(&self, mut videos: Vec<Video>) -> Result<Vec<Video>, YoutubeError> {
        if videos.is_empty() {
            return Ok(videos);
        }

        let ids = videos
            .iter()
            .map(|v| v.id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let details: ListResponse<VideoItem> = self
            .get_json(
                "videos",
                &[
                    ("part", "snippet,contentDetails,statistics"),
                    ("id", ids.as_str()),
                ],
            )
            .await?;

        let mut by_id: HashMap<String, VideoItem> = details
            .items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();

        for video in &mut videos {
            if let Some(item) = by_id.remove(&video.id) {
                video.merge_details(item);
            }
        }
        Ok(videos)
    }

    /// Fetches snippet, content details and statistics for one video.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::NotFound`] if the video does not exist.
    /// - [`YoutubeError::Http`] on network failure or non-2xx status.
    /// - [`YoutubeError::Deserialize`] if the response shape is unexpected.
    pub async fn fetch_video_details(&self, video_id: &str) -> Result<Video, YoutubeError> {
        let page: ListResponse<VideoItem> = self
            .get_json(
                "videos",
                &[
                    ("part", "snippet,contentDetails,statistics"),
                    ("id", video_id),
                ],
            )
            .await?;

        page.items
            .into_iter()
            .next()
            .map(Video::from)
            .ok_or_else(|| YoutubeError::NotFound(format!("video not found: {video_id}")))
    }

    /// Returns up to `max_results` top-level comments of a video.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::PaginationLimit`] if the thread list never ends.
    /// - [`YoutubeError::Http`] on network failure or non-2xx status
    ///   (including comments being disabled on the video).
    /// - [`YoutubeError::Deserialize`] if a response shape is unexpected.
    pub async fn fetch_comments(
        &self,
        video_id: &str,
        max_results: u32,
    ) -> Result<Vec<Comment>, YoutubeError> {
        let target = max_results as usize;
        let mut comments: Vec<Comment> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_count = 0usize;

        while comments.len() < target {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(YoutubeError::PaginationLimit {
                    endpoint: "commentThreads".to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            let page_size = (target - comments.len()).min(COMMENT_PAGE_SIZE).to_string();
            let page: ListResponse<CommentThreadItem> = {
                let mut params = vec![
                    ("part", "snippet"),
                    ("videoId", video_id),
                    ("maxResults", page_size.as_str()),
                ];
                if let Some(token) = page_token.as_deref() {
                    params.push(("pageToken", token));
                }
                self.get_json("commentThreads", &params).await?
            };

            comments.extend(page.items.into_iter().map(Comment::from));
            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }
        comments.truncate(target);
        Ok(comments)
    }

    /// Searches a channel's videos by free-text term and enriches the hits
    /// with duration and statistics the same way as [`Self::fetch_videos`].
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::NotFound`] if the identifier cannot be resolved.
    /// - [`YoutubeError::Http`] on network failure or non-2xx status.
    /// - [`YoutubeError::Deserialize`] if a response shape is unexpected.
    pub async fn search_channel_videos(
        &self,
        identifier: &str,
        term: &str,
        max_results: u32,
    ) -> Result<Vec<Video>, YoutubeError> {
        let channel_id = self.resolve_channel_id(identifier).await?;
        let max_results = max_results.to_string();
        let page: ListResponse<SearchItem> = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("channelId", channel_id.as_str()),
                    ("q", term),
                    ("type", "video"),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        let videos = page
            .items
            .into_iter()
            .filter_map(Video::from_search_item)
            .collect();
        self.attach_details(videos).await
    }

    /// Returns statistics for recent videos filtered by recency and length.
    ///
    /// Fetches `2 × max_results` uploads and hands them to
    /// [`select_video_statistics`] with the current time.
    ///
    /// The details for those uploads come from one `videos` request, and the
    /// API accepts at most 50 IDs per request. Keep `max_results` at 25 or
    /// below; larger values ask for more IDs than one call allows.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::fetch_videos`].
    pub async fn fetch_video_statistics(
        &self,
        identifier: &str,
        max_results: u32,
        months: u32,
        min_duration_minutes: u32,
    ) -> Result<Vec<VideoStat>, YoutubeError> {
        let videos = self
            .fetch_videos(identifier, max_results.saturating_mul(2))
            .await?;
        Ok(select_video_statistics(
            &videos,
            Utc::now(),
            months,
            min_duration_minutes,
            max_results as usize,
        ))
    }
}

/// Keeps videos published within the last `months × 30` days of `now` whose
/// duration is at least `min_duration_minutes`, up to `max_results`, in the
/// order given. Videos without a publish time are skipped.
///
/// A window reaching past the earliest representable time keeps every dated
/// video.
#[must_use]
pub fn select_video_statistics(
    videos: &[Video],
    now: DateTime<Utc>,
    months: u32,
    min_duration_minutes: u32,
    max_results: usize,
) -> Vec<VideoStat> {
    let cutoff = TimeDelta::try_days(30 * i64::from(months))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let min_minutes = f64::from(min_duration_minutes);

    videos
        .iter()
        .filter_map(|video| {
            let published_at = video.published_at?;
            let duration_minutes = video.duration_minutes();
            (published_at >= cutoff && duration_minutes >= min_minutes).then(|| VideoStat {
                video_id: video.id.clone(),
                published_at,
                duration_minutes,
                view_count: video.view_count,
                like_count: video.like_count,
                comment_count: video.comment_count,
            })
        })
        .take(max_results)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::types::Thumbnails;

    fn video(id: &str, days_ago: i64, duration: &str, views: u64, now: DateTime<Utc>) -> Video {
        Video {
            id: id.to_owned(),
            title: None,
            description: None,
            published_at: Some(now - TimeDelta::days(days_ago)),
            duration: Some(duration.to_owned()),
            view_count: Some(views),
            like_count: None,
            comment_count: None,
            thumbnails: Thumbnails::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn filters_by_window_and_duration_preserving_order() {
        let now = now();
        let videos = vec![
            video("recent-long", 5, "PT10M", 10, now),
            video("recent-short", 6, "PT2M", 20, now),
            video("old-long", 200, "PT10M", 30, now),
            video("edge-long", 180, "PT3M", 40, now),
        ];
        let stats = select_video_statistics(&videos, now, 6, 3, 10);
        let ids: Vec<&str> = stats.iter().map(|s| s.video_id.as_str()).collect();
        assert_eq!(ids, vec!["recent-long", "edge-long"]);
        assert!((stats[0].duration_minutes - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stops_at_max_results() {
        let now = now();
        let videos: Vec<Video> = (0..5)
            .map(|i| video(&format!("v{i}"), i, "PT5M", 1, now))
            .collect();
        let stats = select_video_statistics(&videos, now, 1, 3, 2);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[1].video_id, "v1");
    }

    #[test]
    fn skips_videos_without_publish_time() {
        let now = now();
        let mut undated = video("undated", 0, "PT5M", 1, now);
        undated.published_at = None;
        assert!(select_video_statistics(&[undated], now, 6, 3, 10).is_empty());
    }

    #[test]
    fn huge_month_windows_keep_every_dated_video() {
        let now = now();
        let videos = vec![
            video("last-week", 7, "PT5M", 1, now),
            video("decades-old", 20_000, "PT5M", 2, now),
        ];
        for months in [10_000_000, u32::MAX] {
            let stats = select_video_statistics(&videos, now, months, 3, 10);
            let ids: Vec<&str> = stats.iter().map(|s| s.video_id.as_str()).collect();
            assert_eq!(ids, vec!["last-week", "decades-old"], "months = {months}");
        }
        assert!(select_video_statistics(&[], now, u32::MAX, 3, 10).is_empty());
    }
}
