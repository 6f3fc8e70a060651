//! HTTP client for the HubSpot CRM v3 contacts API.
//!
//! Authenticates with a private app token (`Authorization: Bearer`). Search
//! responses are paged with an opaque `after` cursor.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use chanstat_core::{AppConfig, DEFAULT_HUBSPOT_BASE_URL};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::HubspotError;
use crate::properties;
use crate::staleness::is_stale_or_missing;
use crate::types::{Contact, SearchRequest, SearchResponse, UpdateRequest};

const SEARCH_PATH: &str = "crm/v3/objects/contacts/search";
const CONTACTS_PATH: &str = "crm/v3/objects/contacts/";

/// Largest page the search endpoint is asked for.
const MAX_SEARCH_PAGE: usize = 1000;

/// Upper bound on search pages followed by a single run.
const MAX_PAGES: usize = 200;

pub struct HubspotClient {
    client: Client,
    token: String,
    base_url: Url,
}

impl HubspotClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`HubspotError::MissingToken`] if `token` is blank, or
    /// [`HubspotError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(token: &str, timeout_secs: u64) -> Result<Self, HubspotError> {
        Self::with_base_url(token, timeout_secs, DEFAULT_HUBSPOT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`HubspotError::MissingToken`] when `HUBSPOT_PRIVATE_APP_TOKEN`
    /// was not set, plus any error from [`HubspotClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, HubspotError> {
        let token = config
            .hubspot_token
            .as_deref()
            .ok_or(HubspotError::MissingToken)?;
        Self::with_base_url(
            token,
            config.crm_request_timeout_secs,
            &config.hubspot_base_url,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`HubspotError::MissingToken`] if `token` is blank,
    /// [`HubspotError::InvalidBaseUrl`] if `base_url` does not parse, or
    /// [`HubspotError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, HubspotError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(HubspotError::MissingToken);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("chanstat/0.1 (crm-sync)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| HubspotError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token: token.to_owned(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, HubspotError> {
        self.base_url
            .join(path)
            .map_err(|e| HubspotError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    /// Sends an authenticated request. Non-2xx responses are logged with
    /// their body at debug level and surfaced as the `reqwest` status error.
    async fn send(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<reqwest::Response, HubspotError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status_check = response.error_for_status_ref().map(|_| ());
        if let Err(err) = status_check {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(context, status = ?err.status(), body = %body, "HubSpot error response");
            return Err(err.into());
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, HubspotError> {
        let body = self.send(request, context).await?.text().await?;
        serde_json::from_str(&body).map_err(|e| HubspotError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Fetches one page of contacts that have a channel identifier.
    ///
    /// # Errors
    ///
    /// Returns [`HubspotError::Http`] on network failure or non-2xx status,
    /// and [`HubspotError::Deserialize`] if the body is not a search page.
    pub async fn search_contacts_page(
        &self,
        limit: usize,
        after: Option<&str>,
    ) -> Result<SearchResponse, HubspotError> {
        let url = self.endpoint(SEARCH_PATH)?;
        let body = SearchRequest::has_property(
            properties::CHANNEL_IDENTIFIER,
            &properties::SEARCH_PROPERTIES,
            limit,
            after,
        );
        tracing::debug!(limit, after, "HubSpot contact search");
        if let Ok(payload) = serde_json::to_string(&body) {
            tracing::trace!(payload = %payload, "search payload");
        }
        self.send_json(self.client.post(url).json(&body), "contact search")
            .await
    }

    /// Returns up to `limit` distinct contacts whose last-updated value is
    /// missing, unparseable, or older than `now - stale_days`.
    ///
    /// Staleness is filtered in process because the search cannot express
    /// "missing or older than". Pages are requested until `limit` contacts
    /// are collected or the cursor runs out; each page asks for at most the
    /// number still needed (capped at 1000).
    ///
    /// # Errors
    ///
    /// - [`HubspotError::Http`] on network failure or non-2xx status.
    /// - [`HubspotError::Deserialize`] if a page does not parse.
    /// - [`HubspotError::PaginationLimit`] if the cursor never runs out.
    pub async fn search_contacts_needing_update(
        &self,
        limit: usize,
        stale_days: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Contact>, HubspotError> {
        let mut contacts: Vec<Contact> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut after: Option<String> = None;
        let mut page_count = 0usize;

        while contacts.len() < limit {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(HubspotError::PaginationLimit {
                    max_pages: MAX_PAGES,
                });
            }

            let page_limit = (limit - contacts.len()).min(MAX_SEARCH_PAGE);
            let page = self
                .search_contacts_page(page_limit, after.as_deref())
                .await?;

            let received = page.results.len();
            after = page.next_after().map(str::to_owned);
            for contact in page.results {
                if !is_stale_or_missing(contact.last_updated(), now, stale_days) {
                    continue;
                }
                if seen.insert(contact.id.clone()) {
                    contacts.push(contact);
                }
            }
            tracing::debug!(
                page = page_count,
                received,
                collected = contacts.len(),
                "contact search page"
            );

            if after.is_none() {
                break;
            }
        }
        contacts.truncate(limit);
        Ok(contacts)
    }

    /// Writes `properties` on one contact.
    ///
    /// # Errors
    ///
    /// Returns [`HubspotError::Http`] on network failure or non-2xx status.
    pub async fn update_contact_properties(
        &self,
        contact_id: &str,
        properties: &BTreeMap<String, String>,
    ) -> Result<(), HubspotError> {
        let url = self.endpoint(&format!("{CONTACTS_PATH}{contact_id}"))?;
        let body = UpdateRequest { properties };
        self.send(self.client.patch(url).json(&body), "contact update")
            .await?;
        Ok(())
    }
}
