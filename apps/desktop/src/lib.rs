//! Desktop host services for problem lists.
//!
//! Owns the local database, the command layer the front end calls, and the
//! watcher that feeds edited source files back through the parser.

pub mod commands;
pub mod config;
pub mod db;
pub mod sources;
pub mod state;
pub mod watcher;

use config::Config;
use db::SqliteRepository;
use problemlist_core::ListCollection;
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
pub fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Open the database named by `config` and load all lists.
pub fn open_state(config: &Config) -> anyhow::Result<AppState> {
    // Ensure data directory exists
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!("Opening database at {}", config.db_path.display());
    let repository = SqliteRepository::open(&config.db_path)?;
    let lists = ListCollection::load(repository)?;
    tracing::info!("Loaded {} lists", lists.len());

    Ok(AppState::new(lists, config.poll_interval))
}

/// In-memory state for tests and one-off previews.
pub fn open_memory_state() -> anyhow::Result<AppState> {
    let lists = ListCollection::load(SqliteRepository::open_in_memory()?)?;
    Ok(AppState::new(lists, Config::from_lookup(|_| None).poll_interval))
}
