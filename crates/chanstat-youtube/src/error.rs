use thiserror::Error;

/// Errors returned by the YouTube Data API client and the download helper.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network failure or non-2xx HTTP status from the underlying client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A lookup that expects exactly one entity came back empty.
    #[error("not found: {0}")]
    NotFound(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("YouTube API key is missing: set YT_API_KEY or pass a key explicitly")]
    MissingApiKey,

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("pagination limit reached for {endpoint}: exceeded {max_pages} pages")]
    PaginationLimit { endpoint: String, max_pages: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The external downloader exited unsuccessfully.
    #[error("yt-dlp failed (exit code {code:?}): {stderr}")]
    DownloadFailed { code: Option<i32>, stderr: String },
}
