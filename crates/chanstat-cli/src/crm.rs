//! `crm-sync` command handler.

use chanstat_core::AppConfig;
use chanstat_hubspot::{Contact, HubspotClient};
use chanstat_sync::{run_sync, SyncOptions};
use chanstat_youtube::YoutubeClient;
use chrono::Utc;

pub(crate) fn render_contact_line(contact: &Contact) -> String {
    format!(
        "{}  {}  last_updated={}  {}",
        contact.id,
        contact.channel_identifier().unwrap_or("-"),
        contact.last_updated().unwrap_or("never"),
        contact.email().unwrap_or("")
    )
}

/// Runs the sync, or with `dry_run` only lists the contacts it would touch.
///
/// # Errors
///
/// Returns an error if a required credential is missing or the contact
/// search fails. Per-contact failures are logged and counted, not returned.
pub(crate) async fn run_crm_sync(
    config: &AppConfig,
    limit: Option<usize>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut options = SyncOptions::from(config);
    if let Some(limit) = limit {
        options.contact_limit = limit;
    }
    let crm = HubspotClient::from_config(config)?;
    let now = Utc::now();

    if dry_run {
        let contacts = crm
            .search_contacts_needing_update(options.contact_limit, options.stale_days, now)
            .await?;
        for contact in &contacts {
            println!("{}", render_contact_line(contact));
        }
        println!("{} contact(s) need an update (dry run)", contacts.len());
        return Ok(());
    }

    let youtube = YoutubeClient::from_config(config)?;
    let summary = run_sync(&youtube, &crm, &options, now).await?;
    println!(
        "examined={} updated={} skipped={} failed={}",
        summary.examined, summary.updated, summary.skipped, summary.failed
    );
    Ok(())
}
