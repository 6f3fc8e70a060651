use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod crm;
mod youtube;

#[derive(Debug, Parser)]
#[command(name = "chanstat")]
#[command(about = "YouTube channel statistics and CRM sync")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Average views over the last 30 days for videos above a length floor
    AvgViews {
        /// Channel handle (@name), channel URL, or channel ID
        identifier: String,
        /// API key (overrides YT_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
        /// Minimum video length in minutes (defaults to YOUTUBE_MIN_DURATION_MINUTES)
        #[arg(long)]
        min_minutes: Option<u32>,
        /// Number of recent uploads to examine (defaults to YOUTUBE_FETCH_COUNT)
        #[arg(long)]
        fetch_count: Option<u32>,
    },
    /// Search channels by free text
    SearchChannels {
        /// Search terms, joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(long, default_value = "10")]
        max_results: u32,
    },
    /// Print channel info and recent uploads as JSON
    Introspect {
        identifier: String,
        #[arg(long, default_value = "10")]
        max_videos: u32,
        /// Treat IDENTIFIER as free text and introspect the top search hit
        #[arg(long)]
        search: bool,
    },
    /// Print one video's details as JSON
    Video { video_id: String },
    /// List top-level comments on a video
    Comments {
        video_id: String,
        #[arg(long, default_value = "100")]
        max_results: u32,
    },
    /// Search a channel's videos by term
    ChannelVideos {
        identifier: String,
        term: String,
        #[arg(long, default_value = "10")]
        max_results: u32,
    },
    /// Statistics for recent videos filtered by age and length
    Stats {
        identifier: String,
        #[arg(long, default_value = "10")]
        max_results: u32,
        /// Window in months of 30 days
        #[arg(long, default_value = "6")]
        months: u32,
        /// Minimum video length in minutes (defaults to YOUTUBE_MIN_DURATION_MINUTES)
        #[arg(long)]
        min_minutes: Option<u32>,
    },
    /// Download a video with yt-dlp
    Download {
        video_id: String,
        /// Target directory (defaults to CHANSTAT_DOWNLOAD_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// yt-dlp format selector
        #[arg(long, default_value = "best")]
        quality: String,
    },
    /// Refresh stale average-views properties on CRM contacts
    CrmSync {
        /// Maximum contacts to process (defaults to HUBSPOT_CONTACT_LIMIT)
        #[arg(long)]
        limit: Option<usize>,
        /// List stale contacts without calling YouTube or updating the CRM
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = chanstat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::AvgViews {
            identifier,
            api_key,
            min_minutes,
            fetch_count,
        } => {
            youtube::run_avg_views(
                &config,
                &identifier,
                api_key.as_deref(),
                min_minutes,
                fetch_count,
            )
            .await?;
        }
        Commands::SearchChannels { query, max_results } => {
            youtube::run_search_channels(&config, &query.join(" "), max_results).await?;
        }
        Commands::Introspect {
            identifier,
            max_videos,
            search,
        } => youtube::run_introspect(&config, &identifier, max_videos, search).await?,
        Commands::Video { video_id } => youtube::run_video(&config, &video_id).await?,
        Commands::Comments {
            video_id,
            max_results,
        } => youtube::run_comments(&config, &video_id, max_results).await?,
        Commands::ChannelVideos {
            identifier,
            term,
            max_results,
        } => youtube::run_channel_videos(&config, &identifier, &term, max_results).await?,
        Commands::Stats {
            identifier,
            max_results,
            months,
            min_minutes,
        } => {
            youtube::run_stats(&config, &identifier, max_results, months, min_minutes).await?;
        }
        Commands::Download {
            video_id,
            output_dir,
            quality,
        } => youtube::run_download(&config, &video_id, output_dir, &quality).await?,
        Commands::CrmSync { limit, dry_run } => crm::run_crm_sync(&config, limit, dry_run).await?,
    }

    Ok(())
}
