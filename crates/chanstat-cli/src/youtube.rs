//! YouTube command handlers. Results go to stdout; logs go to stderr.

use std::fmt::Write as _;
use std::path::PathBuf;

use chanstat_core::AppConfig;
use chanstat_youtube::{
    average_views_last_30_days, download_video, ChannelSummary, Comment, Video, VideoStat,
    YoutubeClient,
};

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

fn client(config: &AppConfig, api_key: Option<&str>) -> anyhow::Result<YoutubeClient> {
    let client = match api_key {
        Some(key) => YoutubeClient::with_base_url(
            key,
            config.request_timeout_secs,
            &config.youtube_base_url,
        )?,
        None => YoutubeClient::from_config(config)?,
    };
    Ok(client)
}

/// First 100 characters of `description`, with `...` appended when cut.
pub(crate) fn preview(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        let mut cut: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        description.to_owned()
    }
}

pub(crate) fn render_channel_search(channels: &[ChannelSummary]) -> String {
    if channels.is_empty() {
        return "No channels found.\n".to_owned();
    }

    let mut out = format!("Found {} channel(s):\n\n", channels.len());
    for (i, channel) in channels.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, channel.title.as_deref().unwrap_or(""));
        let _ = writeln!(out, "   ID: {}", channel.id);
        if let Some(description) = channel.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "   Description: {}", preview(description));
        }
        out.push('\n');
    }
    out
}

fn count_or_dash(count: Option<u64>) -> String {
    count.map_or_else(|| "-".to_owned(), |c| c.to_string())
}

pub(crate) fn render_comment(comment: &Comment) -> String {
    format!(
        "[{} likes] {}: {}",
        count_or_dash(comment.like_count),
        comment.author.as_deref().unwrap_or("(unknown)"),
        comment.text.as_deref().unwrap_or("")
    )
}

pub(crate) fn render_video_line(video: &Video) -> String {
    let published = video
        .published_at
        .map_or_else(|| "-".to_owned(), |p| p.format("%Y-%m-%d").to_string());
    format!(
        "{}  {}  {:.1}min  views={}  {}",
        video.id,
        published,
        video.duration_minutes(),
        count_or_dash(video.view_count),
        video.title.as_deref().unwrap_or("")
    )
}

pub(crate) fn render_stat_line(stat: &VideoStat) -> String {
    format!(
        "{}  {}  {:.1}min  views={}  likes={}  comments={}",
        stat.video_id,
        stat.published_at.format("%Y-%m-%d"),
        stat.duration_minutes,
        count_or_dash(stat.view_count),
        count_or_dash(stat.like_count),
        count_or_dash(stat.comment_count)
    )
}

pub(crate) async fn run_avg_views(
    config: &AppConfig,
    identifier: &str,
    api_key: Option<&str>,
    min_minutes: Option<u32>,
    fetch_count: Option<u32>,
) -> anyhow::Result<()> {
    let client = client(config, api_key)?;
    let min_minutes = min_minutes.unwrap_or(config.min_duration_minutes);
    let fetch_count = fetch_count.unwrap_or(config.fetch_count);

    let average = average_views_last_30_days(&client, identifier, min_minutes, fetch_count).await?;
    println!("Average views (last 30 days, >{min_minutes}min): {average:.2}");
    Ok(())
}

pub(crate) async fn run_search_channels(
    config: &AppConfig,
    query: &str,
    max_results: u32,
) -> anyhow::Result<()> {
    let client = client(config, None)?;
    println!("Searching for channels matching: '{query}'...\n");
    let channels = client.search_channels(query, max_results).await?;
    print!("{}", render_channel_search(&channels));
    Ok(())
}

pub(crate) async fn run_introspect(
    config: &AppConfig,
    identifier: &str,
    max_videos: u32,
    search: bool,
) -> anyhow::Result<()> {
    let client = client(config, None)?;
    let introspection = if search {
        client
            .search_and_introspect_channel(identifier, max_videos)
            .await?
    } else {
        client.introspect_channel(identifier, max_videos).await?
    };
    println!("{}", serde_json::to_string_pretty(&introspection)?);
    Ok(())
}

pub(crate) async fn run_video(config: &AppConfig, video_id: &str) -> anyhow::Result<()> {
    let client = client(config, None)?;
    let video = client.fetch_video_details(video_id).await?;
    println!("{}", serde_json::to_string_pretty(&video)?);
    Ok(())
}

pub(crate) async fn run_comments(
    config: &AppConfig,
    video_id: &str,
    max_results: u32,
) -> anyhow::Result<()> {
    let client = client(config, None)?;
    let comments = client.fetch_comments(video_id, max_results).await?;
    for comment in &comments {
        println!("{}", render_comment(comment));
    }
    tracing::info!(video_id, count = comments.len(), "comments fetched");
    Ok(())
}

pub(crate) async fn run_channel_videos(
    config: &AppConfig,
    identifier: &str,
    term: &str,
    max_results: u32,
) -> anyhow::Result<()> {
    let client = client(config, None)?;
    let videos = client
        .search_channel_videos(identifier, term, max_results)
        .await?;
    if videos.is_empty() {
        println!("No videos found.");
    }
    for video in &videos {
        println!("{}", render_video_line(video));
    }
    Ok(())
}

pub(crate) async fn run_stats(
    config: &AppConfig,
    identifier: &str,
    max_results: u32,
    months: u32,
    min_minutes: Option<u32>,
) -> anyhow::Result<()> {
    let client = client(config, None)?;
    let min_minutes = min_minutes.unwrap_or(config.min_duration_minutes);
    let stats = client
        .fetch_video_statistics(identifier, max_results, months, min_minutes)
        .await?;
    if stats.is_empty() {
        println!("No videos matched.");
    }
    for stat in &stats {
        println!("{}", render_stat_line(stat));
    }
    Ok(())
}

pub(crate) async fn run_download(
    config: &AppConfig,
    video_id: &str,
    output_dir: Option<PathBuf>,
    quality: &str,
) -> anyhow::Result<()> {
    let output_dir = output_dir.unwrap_or_else(|| config.download_dir.clone());
    let dir = download_video(video_id, &output_dir, quality, &config.ytdlp_program).await?;
    println!("Downloaded {video_id} to {}", dir.display());
    Ok(())
}
