//! Wire types for the CRM v3 contact search and update endpoints.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::properties;

/// Body of `POST /crm/v3/objects/contacts/search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub filter_groups: Vec<FilterGroup<'a>>,
    pub properties: &'a [&'a str],
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<&'a str>,
}

impl<'a> SearchRequest<'a> {
    /// Search for contacts that have any value in `property`.
    #[must_use]
    pub fn has_property(
        property: &'a str,
        properties: &'a [&'a str],
        limit: usize,
        after: Option<&'a str>,
    ) -> Self {
        Self {
            filter_groups: vec![FilterGroup {
                filters: vec![Filter {
                    property_name: property,
                    operator: "HAS_PROPERTY",
                }],
            }],
            properties,
            limit,
            after,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilterGroup<'a> {
    pub filters: Vec<Filter<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter<'a> {
    pub property_name: &'a str,
    pub operator: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Contact>,
    pub paging: Option<Paging>,
}

impl SearchResponse {
    /// Cursor for the next page, if any.
    #[must_use]
    pub fn next_after(&self) -> Option<&str> {
        self.paging
            .as_ref()?
            .next
            .as_ref()?
            .after
            .as_deref()
            .filter(|after| !after.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct Paging {
    pub next: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
pub struct NextPage {
    pub after: Option<String>,
}

/// Body of `PATCH /crm/v3/objects/contacts/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdateRequest<'a> {
    pub properties: &'a BTreeMap<String, String>,
}

/// A CRM contact with the subset of properties requested by the search.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Contact {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, Option<String>>,
}

impl Contact {
    /// Value of `name`; blank values are treated as absent.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)?
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn channel_identifier(&self) -> Option<&str> {
        self.property(properties::CHANNEL_IDENTIFIER)
    }

    #[must_use]
    pub fn last_updated(&self) -> Option<&str> {
        self.property(properties::LAST_UPDATED)
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.property(properties::EMAIL)
    }
}
