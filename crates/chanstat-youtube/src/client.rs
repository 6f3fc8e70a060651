//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with API-key management, URL construction and typed
//! response deserialization. Endpoint methods live in `channels.rs` and
//! `videos.rs`; this module owns construction and the shared GET helper.

use std::time::Duration;

use chanstat_core::{AppConfig, DEFAULT_YOUTUBE_BASE_URL};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::YoutubeError;

/// Page size cap for `playlistItems` requests.
pub(crate) const PLAYLIST_PAGE_SIZE: usize = 50;

/// Page size cap for `commentThreads` requests.
pub(crate) const COMMENT_PAGE_SIZE: usize = 100;

/// Upper bound on pages followed by a single pagination loop.
pub(crate) const MAX_PAGES: usize = 200;

/// Client for the YouTube Data API.
///
/// Use [`YoutubeClient::new`] for production, [`YoutubeClient::from_config`]
/// to build from [`AppConfig`], or [`YoutubeClient::with_base_url`] to point
/// at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::MissingApiKey`] if `api_key` is blank, or
    /// [`YoutubeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_YOUTUBE_BASE_URL)
    }

    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::MissingApiKey`] when `YT_API_KEY` was not set,
    /// plus any error from [`YoutubeClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, YoutubeError> {
        let api_key = config
            .youtube_api_key
            .as_deref()
            .ok_or(YoutubeError::MissingApiKey)?;
        Self::with_base_url(
            api_key,
            config.request_timeout_secs,
            &config.youtube_base_url,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::MissingApiKey`] if `api_key` is blank,
    /// [`YoutubeError::InvalidBaseUrl`] if `base_url` does not parse, or
    /// [`YoutubeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(YoutubeError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("chanstat/0.1 (channel-statistics)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the endpoint
        // instead of replacing the last path segment (`/youtube/v3`).
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Builds the request URL for `endpoint` with percent-encoded query
    /// parameters. The API key is always appended last.
    pub(crate) fn build_url(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                url: format!("{}{endpoint}", self.base_url),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request and deserializes the JSON body into `T`.
    ///
    /// Non-2xx responses are surfaced as the `reqwest` status error after the
    /// upstream error body has been logged at debug level.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] on network failure or a non-2xx status,
    /// and [`YoutubeError::Deserialize`] if the body does not match `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, YoutubeError> {
        let url = self.build_url(endpoint, params)?;
        tracing::debug!(endpoint, ?params, "YouTube API request");

        let response = self.client.get(url).send().await?;
        let status_check = response.error_for_status_ref().map(|_| ());
        if let Err(err) = status_check {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(endpoint, status = ?err.status(), body = %body, "YouTube API error response");
            return Err(err.into());
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: endpoint.to_owned(),
            source: e,
        })
    }
}
