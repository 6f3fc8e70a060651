use chanstat_hubspot::HubspotError;
use thiserror::Error;

/// Failures that abort a whole sync run. Per-contact failures are counted in
/// the run summary instead.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("contact search failed: {0}")]
    Search(#[from] HubspotError),
}
