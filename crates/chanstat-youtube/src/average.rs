//! Trailing 30-day average view count for a channel.

use chrono::{DateTime, Duration, Utc};

use crate::client::YoutubeClient;
use crate::error::YoutubeError;
use crate::models::Video;

/// Length of the trailing window, in days.
pub const WINDOW_DAYS: i64 = 30;

pub const DEFAULT_MIN_MINUTES: u32 = 3;
pub const DEFAULT_FETCH_COUNT: u32 = 50;

/// Average views of the channel's videos published in the last 30 days that
/// run at least `min_minutes`.
///
/// Only the `fetch_count` most recent uploads are examined, so a channel
/// that posts more than `fetch_count` videos a month is averaged over its
/// newest `fetch_count` uploads rather than the whole window.
///
/// # Errors
///
/// Propagates errors from [`YoutubeClient::fetch_videos`].
pub async fn average_views_last_30_days(
    client: &YoutubeClient,
    identifier: &str,
    min_minutes: u32,
    fetch_count: u32,
) -> Result<f64, YoutubeError> {
    let videos = client.fetch_videos(identifier, fetch_count).await?;
    let average = average_recent_views(&videos, Utc::now(), min_minutes);
    tracing::debug!(
        identifier,
        examined = videos.len(),
        average,
        "computed 30-day average views"
    );
    Ok(average)
}

/// Mean view count of `videos` published at or after `now - 30 days` with a
/// duration of at least `min_minutes`. Missing view counts count as zero.
///
/// Returns exactly `0.0` when no video qualifies.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_recent_views(videos: &[Video], now: DateTime<Utc>, min_minutes: u32) -> f64 {
    let cutoff = now - Duration::days(WINDOW_DAYS);
    let min_minutes = f64::from(min_minutes);

    let views: Vec<u64> = videos
        .iter()
        .filter(|v| v.published_at.is_some_and(|published| published >= cutoff))
        .filter(|v| v.duration_minutes() >= min_minutes)
        .map(|v| v.view_count.unwrap_or(0))
        .collect();

    if views.is_empty() {
        return 0.0;
    }
    let total: u128 = views.iter().map(|&v| u128::from(v)).sum();
    total as f64 / views.len() as f64
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::types::Thumbnails;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 9, 0, 0).unwrap()
    }

    fn video(days_ago: i64, duration: Option<&str>, views: Option<u64>) -> Video {
        Video {
            id: format!("v{days_ago}"),
            title: None,
            description: None,
            published_at: Some(now() - Duration::days(days_ago)),
            duration: duration.map(str::to_owned),
            view_count: views,
            like_count: None,
            comment_count: None,
            thumbnails: Thumbnails::new(),
        }
    }

    #[test]
    fn averages_only_recent_long_videos() {
        let videos = vec![
            video(1, Some("PT10M"), Some(100)),
            video(2, Some("PT4M"), Some(300)),
            video(3, Some("PT2M59S"), Some(10_000)),
            video(31, Some("PT20M"), Some(50_000)),
            video(29, Some("PT1H"), Some(200)),
        ];
        let avg = average_recent_views(&videos, now(), 3);
        assert!((avg - 200.0).abs() < f64::EPSILON, "got {avg}");
    }

    #[test]
    fn empty_qualifying_set_is_exactly_zero() {
        let videos = vec![video(40, Some("PT10M"), Some(100)), video(1, None, Some(5))];
        assert_eq!(average_recent_views(&videos, now(), 3).to_bits(), 0.0f64.to_bits());
        assert_eq!(average_recent_views(&[], now(), 3).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn video_exactly_thirty_days_old_is_included() {
        let videos = vec![video(30, Some("PT5M"), Some(70))];
        assert!((average_recent_views(&videos, now(), 3) - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_view_count_counts_as_zero() {
        let videos = vec![video(1, Some("PT5M"), None), video(2, Some("PT5M"), Some(90))];
        assert!((average_recent_views(&videos, now(), 3) - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn undated_videos_are_skipped() {
        let mut undated = video(1, Some("PT5M"), Some(1_000));
        undated.published_at = None;
        let videos = vec![undated, video(2, Some("PT5M"), Some(10))];
        assert!((average_recent_views(&videos, now(), 3) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_minute_floor_keeps_shorts() {
        let videos = vec![video(1, Some("PT30S"), Some(10)), video(1, None, Some(30))];
        assert!((average_recent_views(&videos, now(), 0) - 20.0).abs() < f64::EPSILON);
    }
}
