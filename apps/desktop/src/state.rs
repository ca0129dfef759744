//! Application state.

use crate::commands::CommandError;
use crate::db::SqliteRepository;
use crate::watcher::{FileWatcher, SourceEvent};
use problemlist_core::ListCollection;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::Mutex as AsyncMutex;

/// Lists backed by the local database.
pub type SharedLists = Arc<Mutex<ListCollection<SqliteRepository>>>;

const EVENT_CAPACITY: usize = 64;

/// Global application state.
pub struct AppState {
    pub lists: SharedLists,
    pub watcher: AsyncMutex<FileWatcher>,
    pub events: broadcast::Sender<SourceEvent>,
}

impl AppState {
    pub fn new(lists: ListCollection<SqliteRepository>, poll_interval: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            lists: Arc::new(Mutex::new(lists)),
            watcher: AsyncMutex::new(FileWatcher::new(poll_interval)),
            events,
        }
    }

    /// Lock the list collection.
    pub fn lists(&self) -> Result<MutexGuard<'_, ListCollection<SqliteRepository>>, CommandError> {
        lock_lists(&self.lists)
    }

    /// Receive watcher events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SourceEvent> {
        self.events.subscribe()
    }
}

/// Lock shared lists, turning a poisoned lock into a command error.
pub fn lock_lists(
    lists: &SharedLists,
) -> Result<MutexGuard<'_, ListCollection<SqliteRepository>>, CommandError> {
    lists.lock().map_err(|_| CommandError {
        message: "list store lock poisoned".to_string(),
    })
}
