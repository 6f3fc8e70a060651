//! Batch job that refreshes the 30-day average views stored on CRM contacts.

pub mod error;
pub mod job;
pub mod options;

pub use error::SyncError;
pub use job::{process_contact, round_to_hundred, run_sync, ContactOutcome, SyncSummary};
pub use options::SyncOptions;
