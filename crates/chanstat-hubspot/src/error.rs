use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubspotError {
    /// Network failure or non-2xx HTTP status from the underlying client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("HubSpot private app token is missing: set HUBSPOT_PRIVATE_APP_TOKEN")]
    MissingToken,

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("pagination limit reached for contact search: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },
}
