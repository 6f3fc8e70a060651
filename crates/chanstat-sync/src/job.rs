//! The CRM sync run: find stale contacts, recompute, write back.

use std::collections::BTreeMap;

use chanstat_hubspot::{is_stale_or_missing, midnight_utc_iso, properties, Contact, HubspotClient};
use chanstat_youtube::{average_views_last_30_days, YoutubeClient};
use chrono::{DateTime, Utc};

use crate::error::SyncError;
use crate::options::SyncOptions;

/// Result of processing one contact.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactOutcome {
    /// Both properties were written; carries the stored (rounded) average.
    Updated { average: u64 },
    /// Nothing to do: no channel identifier, or the stored value is fresh.
    Skipped,
    /// The calculator or the update failed. The contact keeps its old
    /// timestamp and is retried on the next run.
    Failed { reason: String },
}

/// Counts for one sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub examined: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncSummary {
    fn record(&mut self, outcome: &ContactOutcome) {
        match outcome {
            ContactOutcome::Updated { .. } => self.updated += 1,
            ContactOutcome::Skipped => self.skipped += 1,
            ContactOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Rounds to the nearest hundred, ties to even (`250 -> 200`, `350 -> 400`).
/// Negative or non-finite input rounds to zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_to_hundred(average: f64) -> u64 {
    let rounded = (average / 100.0).round_ties_even() * 100.0;
    if rounded.is_finite() && rounded > 0.0 {
        rounded as u64
    } else {
        0
    }
}

/// Runs one sync over up to `options.contact_limit` stale contacts.
///
/// Contacts are processed one at a time. Per-contact failures are logged
/// and counted; only the contact search itself can fail the run.
///
/// # Errors
///
/// Returns [`SyncError::Search`] if the contact search fails.
pub async fn run_sync(
    youtube: &YoutubeClient,
    crm: &HubspotClient,
    options: &SyncOptions,
    now: DateTime<Utc>,
) -> Result<SyncSummary, SyncError> {
    let contacts = crm
        .search_contacts_needing_update(options.contact_limit, options.stale_days, now)
        .await?;
    tracing::info!(count = contacts.len(), "found contacts needing update");

    let mut summary = SyncSummary {
        examined: contacts.len(),
        ..SyncSummary::default()
    };

    for contact in &contacts {
        let outcome = if is_stale_or_missing(contact.last_updated(), now, options.stale_days) {
            process_contact(youtube, crm, contact, options, now).await
        } else {
            ContactOutcome::Skipped
        };
        summary.record(&outcome);
    }

    tracing::info!(
        examined = summary.examined,
        updated = summary.updated,
        skipped = summary.skipped,
        failed = summary.failed,
        "sync finished"
    );
    Ok(summary)
}

/// Recomputes and stores the average for one contact.
pub async fn process_contact(
    youtube: &YoutubeClient,
    crm: &HubspotClient,
    contact: &Contact,
    options: &SyncOptions,
    now: DateTime<Utc>,
) -> ContactOutcome {
    let Some(identifier) = contact.channel_identifier() else {
        tracing::warn!(
            contact_id = %contact.id,
            property = properties::CHANNEL_IDENTIFIER,
            "skipping contact without channel identifier"
        );
        return ContactOutcome::Skipped;
    };
    tracing::debug!(
        contact_id = %contact.id,
        email = contact.email().unwrap_or(""),
        identifier,
        last_updated = contact.last_updated().unwrap_or(""),
        "processing contact"
    );

    let average = match average_views_last_30_days(
        youtube,
        identifier,
        options.min_duration_minutes,
        options.fetch_count,
    )
    .await
    {
        Ok(avg) => avg,
        Err(e) => {
            tracing::error!(
                contact_id = %contact.id,
                identifier,
                error = %e,
                "failed to compute average views"
            );
            return ContactOutcome::Failed {
                reason: format!("average views: {e}"),
            };
        }
    };

    let rounded = round_to_hundred(average);
    let mut update = BTreeMap::new();
    update.insert(properties::AVERAGE_VIEWS.to_owned(), rounded.to_string());
    update.insert(properties::LAST_UPDATED.to_owned(), midnight_utc_iso(now));

    if let Err(e) = crm.update_contact_properties(&contact.id, &update).await {
        tracing::error!(contact_id = %contact.id, error = %e, "failed to update contact");
        return ContactOutcome::Failed {
            reason: format!("update: {e}"),
        };
    }

    tracing::info!(
        contact_id = %contact.id,
        email = contact.email().unwrap_or(""),
        identifier,
        average = rounded,
        "contact updated"
    );
    ContactOutcome::Updated { average: rounded }
}
