//! HubSpot CRM v3 contacts client: stale-contact search and property updates.

pub mod client;
pub mod error;
pub mod properties;
pub mod staleness;
pub mod types;

pub use client::HubspotClient;
pub use error::HubspotError;
pub use staleness::{is_stale_or_missing, midnight_utc_iso, parse_crm_timestamp};
pub use types::Contact;
