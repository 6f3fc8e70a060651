use std::path::PathBuf;

use crate::ConfigError;

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_HUBSPOT_BASE_URL: &str = "https://api.hubapi.com";

#[derive(Clone)]
pub struct AppConfig {
    pub youtube_api_key: Option<String>,
    pub youtube_base_url: String,
    pub hubspot_token: Option<String>,
    pub hubspot_base_url: String,
    pub request_timeout_secs: u64,
    pub crm_request_timeout_secs: u64,
    /// Days after which a contact's stored average is recomputed.
    pub stale_days: i64,
    pub min_duration_minutes: u32,
    pub fetch_count: u32,
    pub contact_limit: usize,
    pub download_dir: PathBuf,
    pub ytdlp_program: String,
    pub log_level: String,
}

impl AppConfig {
    /// Returns the YouTube API key or the error naming the variable to set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `YT_API_KEY` was not set.
    pub fn require_youtube_api_key(&self) -> Result<&str, ConfigError> {
        self.youtube_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("YT_API_KEY".to_string()))
    }

    /// Returns the HubSpot private app token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `HUBSPOT_PRIVATE_APP_TOKEN`
    /// was not set.
    pub fn require_hubspot_token(&self) -> Result<&str, ConfigError> {
        self.hubspot_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("HUBSPOT_PRIVATE_APP_TOKEN".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_base_url", &self.youtube_base_url)
            .field(
                "hubspot_token",
                &self.hubspot_token.as_ref().map(|_| "[redacted]"),
            )
            .field("hubspot_base_url", &self.hubspot_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("crm_request_timeout_secs", &self.crm_request_timeout_secs)
            .field("stale_days", &self.stale_days)
            .field("min_duration_minutes", &self.min_duration_minutes)
            .field("fetch_count", &self.fetch_count)
            .field("contact_limit", &self.contact_limit)
            .field("download_dir", &self.download_dir)
            .field("ytdlp_program", &self.ytdlp_program)
            .field("log_level", &self.log_level)
            .finish()
    }
}
