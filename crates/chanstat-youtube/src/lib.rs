pub mod average;
pub mod client;
pub mod download;
pub mod duration;
pub mod error;
pub mod models;
pub mod parse;
pub mod resolve;
pub mod types;

mod channels;
mod videos;

pub use average::{average_recent_views, average_views_last_30_days};
pub use client::YoutubeClient;
pub use download::download_video;
pub use duration::parse_duration_minutes;
pub use error::YoutubeError;
pub use models::{Channel, ChannelIntrospection, ChannelSummary, Comment, Video, VideoStat};
pub use videos::select_video_statistics;
