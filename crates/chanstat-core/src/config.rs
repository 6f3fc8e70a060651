use std::env::VarError;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{AppConfig, DEFAULT_HUBSPOT_BASE_URL, DEFAULT_YOUTUBE_BASE_URL};
use crate::ConfigError;

/// Reads `.env` (if present) into the process environment, then builds the
/// configuration from it.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for a malformed numeric setting.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] without touching `.env`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for a malformed numeric setting.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|name| std::env::var(name))
}

/// Parses `var` as `T`, or returns `default` when it is unset.
fn parse_setting<T>(
    optional: &dyn Fn(&str) -> Option<String>,
    var: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = optional(var) else {
        return Ok(default);
    };
    raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_owned(),
        reason: format!("{raw:?}: {e}"),
    })
}

/// Credentials stay optional here. Commands that need one call
/// [`AppConfig::require_youtube_api_key`] or
/// [`AppConfig::require_hubspot_token`].
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    // Unset and blank are the same thing.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };
    let text = |var: &str, default: &str| optional(var).unwrap_or_else(|| default.to_owned());

    let youtube_api_key = optional("YT_API_KEY");
    let hubspot_token = optional("HUBSPOT_PRIVATE_APP_TOKEN");
    let youtube_base_url = text("YOUTUBE_API_BASE_URL", DEFAULT_YOUTUBE_BASE_URL);
    let hubspot_base_url = text("HUBSPOT_BASE_URL", DEFAULT_HUBSPOT_BASE_URL);

    let request_timeout_secs: u64 = parse_setting(&optional, "CHANSTAT_REQUEST_TIMEOUT_SECS", 15)?;
    let crm_request_timeout_secs: u64 = parse_setting(&optional, "HUBSPOT_REQUEST_TIMEOUT_SECS", 20)?;
    let stale_days: u32 = parse_setting(&optional, "YOUTUBE_AVG_STALE_DAYS", 30)?;
    let min_duration_minutes: u32 = parse_setting(&optional, "YOUTUBE_MIN_DURATION_MINUTES", 3)?;
    let fetch_count: u32 = parse_setting(&optional, "YOUTUBE_FETCH_COUNT", 50)?;
    let contact_limit: usize = parse_setting(&optional, "HUBSPOT_CONTACT_LIMIT", 200)?;

    let download_dir = PathBuf::from(text("CHANSTAT_DOWNLOAD_DIR", "downloads"));
    let ytdlp_program = text("CHANSTAT_YTDLP_BIN", "yt-dlp");
    let log_level = text("CHANSTAT_LOG_LEVEL", "info");

    Ok(AppConfig {
        youtube_api_key,
        youtube_base_url,
        hubspot_token,
        hubspot_base_url,
        request_timeout_secs,
        crm_request_timeout_secs,
        stale_days: i64::from(stale_days),
        min_duration_minutes,
        fetch_count,
        contact_limit,
        download_dir,
        ytdlp_program,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
