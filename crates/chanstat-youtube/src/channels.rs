//! Channel resolution, lookup and search endpoints.

use crate::client::YoutubeClient;
use crate::error::YoutubeError;
use crate::models::{Channel, ChannelIntrospection, ChannelSummary};
use crate::resolve::{classify, Resolution};
use crate::types::{ChannelItem, ListResponse, SearchItem};

impl YoutubeClient {
    /// Resolves a handle, URL or channel ID to the canonical channel ID.
    ///
    /// Canonical IDs (and URLs ending in one) are returned without any
    /// request. Anything else is searched and the first hit's channel ID is
    /// used.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::NotFound`] if the search has no results.
    /// - [`YoutubeError::Http`] on network failure or non-2xx status.
    /// - [`YoutubeError::Deserialize`] if the response shape is unexpected.
    pub async fn resolve_channel_id(&self, identifier: &str) -> Result<String, YoutubeError> {
        let query = match classify(identifier) {
            Resolution::Direct(id) => return Ok(id.to_owned()),
            Resolution::Search(query) => query,
        };

        let page: ListResponse<SearchItem> = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("q", query),
                    ("type", "channel"),
                    ("maxResults", "1"),
                ],
            )
            .await?;

        let channel_id = page
            .items
            .first()
            .and_then(SearchItem::channel_id)
            .map(str::to_owned)
            .ok_or_else(|| {
                YoutubeError::NotFound(format!("channel not found for identifier: {query}"))
            })?;
        tracing::debug!(identifier = query, channel_id = %channel_id, "resolved channel");
        Ok(channel_id)
    }

    /// Fetches snippet, statistics and content details for a channel.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::NotFound`] if resolution or the lookup is empty.
    /// - [`YoutubeError::Http`] on network failure or non-2xx status.
    /// - [`YoutubeError::Deserialize`] if the response shape is unexpected.
    pub async fn fetch_channel_info(&self, identifier: &str) -> Result<Channel, YoutubeError> {
        let channel_id = self.resolve_channel_id(identifier).await?;
        let page: ListResponse<ChannelItem> = self
            .get_json(
                "channels",
                &[
                    ("part", "snippet,statistics,contentDetails"),
                    ("id", channel_id.as_str()),
                ],
            )
            .await?;

        page.items
            .into_iter()
            .next()
            .map(Channel::from)
            .ok_or_else(|| YoutubeError::NotFound(format!("channel not found: {channel_id}")))
    }

    /// Reads the uploads playlist ID of an already-resolved channel.
    ///
    /// Returns `None` when the channel lookup is empty or lists no uploads.
    pub(crate) async fn uploads_playlist_id(
        &self,
        channel_id: &str,
    ) -> Result<Option<String>, YoutubeError> {
        let page: ListResponse<ChannelItem> = self
            .get_json("channels", &[("part", "contentDetails"), ("id", channel_id)])
            .await?;
        Ok(page
            .items
            .first()
            .and_then(ChannelItem::uploads_playlist_id)
            .map(str::to_owned))
    }

    /// Searches channels matching `query`. No identifier resolution.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Http`] on network failure or non-2xx status.
    /// - [`YoutubeError::Deserialize`] if the response shape is unexpected.
    pub async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<ChannelSummary>, YoutubeError> {
        let max_results = max_results.to_string();
        let page: ListResponse<SearchItem> = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "channel"),
                    ("q", query),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        Ok(page
            .items
            .into_iter()
            .filter_map(ChannelSummary::from_search_item)
            .collect())
    }

    /// Resolves `identifier` and returns channel info with recent uploads.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::fetch_channel_info`] and
    /// [`Self::fetch_videos`].
    pub async fn introspect_channel(
        &self,
        identifier: &str,
        max_videos: u32,
    ) -> Result<ChannelIntrospection, YoutubeError> {
        let channel_id = self.resolve_channel_id(identifier).await?;
        let channel = self.fetch_channel_info(&channel_id).await?;
        let videos = self.fetch_videos(&channel_id, max_videos).await?;
        Ok(ChannelIntrospection { channel, videos })
    }

    /// Searches for a channel by free text and introspects the first hit.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::NotFound`] if the search is empty, otherwise
    /// propagates errors from [`Self::introspect_channel`].
    pub async fn search_and_introspect_channel(
        &self,
        query: &str,
        video_count: u32,
    ) -> Result<ChannelIntrospection, YoutubeError> {
        let first = self
            .search_channels(query, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| YoutubeError::NotFound(format!("no channel found for query: {query}")))?;
        self.introspect_channel(&first.id, video_count).await
    }
}
