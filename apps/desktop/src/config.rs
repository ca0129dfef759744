//! Runtime configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

/// Database path override.
pub const DB_VAR: &str = "PROBLEMLIST_DB";
/// Log filter; falls back to `RUST_LOG`, then `info`.
pub const LOG_VAR: &str = "PROBLEMLIST_LOG";
/// Watcher poll interval in seconds.
pub const POLL_VAR: &str = "PROBLEMLIST_POLL_SECS";

const DEFAULT_POLL_SECS: u64 = 2;

/// Host configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_filter: String,
    pub poll_interval: Duration,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup(DB_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let log_filter = lookup(LOG_VAR)
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());

        let poll_secs = lookup(POLL_VAR)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_POLL_SECS);

        Self {
            db_path,
            log_filter,
            poll_interval: Duration::from_secs(poll_secs),
        }
    }
}

fn default_db_path() -> PathBuf {
    // App data directory, falling back to the current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("problemlist")
        .join("problemlist.db")
}
