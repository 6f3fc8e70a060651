use chanstat_core::AppConfig;

/// Tunables for one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub stale_days: i64,
    pub min_duration_minutes: u32,
    pub fetch_count: u32,
    pub contact_limit: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            stale_days: 30,
            min_duration_minutes: chanstat_youtube::average::DEFAULT_MIN_MINUTES,
            fetch_count: chanstat_youtube::average::DEFAULT_FETCH_COUNT,
            contact_limit: 200,
        }
    }
}

impl From<&AppConfig> for SyncOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            stale_days: config.stale_days,
            min_duration_minutes: config.min_duration_minutes,
            fetch_count: config.fetch_count,
            contact_limit: config.contact_limit,
        }
    }
}
