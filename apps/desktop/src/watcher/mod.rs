//! File system watcher that keeps stored lists in step with their sources.

use crate::sources::{import_source, is_markdown, ImportOptions, ImportResult};
use crate::state::{lock_lists, SharedLists};
use notify::{
    event::{CreateKind, ModifyKind, RemoveKind},
    Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tokio::sync::broadcast;

/// Watcher errors.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("failed to watch: {0}")]
    Notify(#[from] notify::Error),

    #[error("watcher not started")]
    NotStarted,
}

/// Event published after a source file changed.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceEvent {
    Imported { path: String, result: ImportResult },
    Rejected { path: String, message: String },
    Removed { path: String },
}

/// How a file system event affects a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Written,
    Removed,
}

/// File watcher that monitors directories for changes.
pub struct FileWatcher {
    watcher: Option<RecommendedWatcher>,
    watched_dirs: Arc<Mutex<HashSet<PathBuf>>>,
    stop_tx: Option<Sender<()>>,
    poll_interval: Duration,
}

impl FileWatcher {
    /// Create a new file watcher.
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            watcher: None,
            watched_dirs: Arc::new(Mutex::new(HashSet::new())),
            stop_tx: None,
            poll_interval,
        }
    }

    /// Check if the watcher has been started.
    pub fn is_started(&self) -> bool {
        self.watcher.is_some()
    }

    /// Start the watcher; changed sources are re-imported into `lists`.
    pub fn start(
        &mut self,
        lists: SharedLists,
        events: broadcast::Sender<SourceEvent>,
    ) -> Result<(), WatchError> {
        if self.watcher.is_some() {
            return Ok(());
        }

        let (tx, rx) = channel();
        let (stop_tx, stop_rx) = channel::<()>();

        let watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                if let Ok(event) = result {
                    let _ = tx.send(event);
                }
            },
            Config::default().with_poll_interval(self.poll_interval),
        )?;

        self.watcher = Some(watcher);
        self.stop_tx = Some(stop_tx);

        thread::spawn(move || {
            Self::event_loop(rx, stop_rx, lists, events);
        });

        tracing::info!("file watcher started");
        Ok(())
    }

    /// Stop the file watcher.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        self.watcher = None;
        if let Ok(mut dirs) = self.watched_dirs.lock() {
            dirs.clear();
        }
    }

    /// Watch a directory for changes.
    pub fn watch(&mut self, path: PathBuf) -> Result<(), WatchError> {
        let watcher = self.watcher.as_mut().ok_or(WatchError::NotStarted)?;
        watcher.watch(&path, RecursiveMode::Recursive)?;

        tracing::info!("watching {}", path.display());
        if let Ok(mut dirs) = self.watched_dirs.lock() {
            dirs.insert(path);
        }
        Ok(())
    }

    /// Stop watching a directory.
    pub fn unwatch(&mut self, path: &Path) -> Result<(), WatchError> {
        let watcher = self.watcher.as_mut().ok_or(WatchError::NotStarted)?;
        watcher.unwatch(path)?;

        if let Ok(mut dirs) = self.watched_dirs.lock() {
            dirs.remove(path);
        }
        Ok(())
    }

    /// Get the list of watched directories.
    pub fn get_watched_directories(&self) -> Vec<String> {
        let mut dirs: Vec<String> = self
            .watched_dirs
            .lock()
            .map(|dirs| dirs.iter().map(|p| p.to_string_lossy().to_string()).collect())
            .unwrap_or_default();
        dirs.sort();
        dirs
    }

    fn event_loop(
        rx: Receiver<Event>,
        stop_rx: Receiver<()>,
        lists: SharedLists,
        events: broadcast::Sender<SourceEvent>,
    ) {
        loop {
            if stop_rx.try_recv().is_ok() {
                break;
            }

            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(event) => {
                    for published in Self::handle_event(&event, &lists) {
                        // No subscribers is fine
                        let _ = events.send(published);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::info!("file watcher stopped");
    }

    fn classify(kind: &EventKind) -> Option<Change> {
        match kind {
            EventKind::Create(CreateKind::File) => Some(Change::Written),
            EventKind::Modify(ModifyKind::Data(_)) => Some(Change::Written),
            EventKind::Modify(ModifyKind::Name(_)) => Some(Change::Written),
            EventKind::Remove(RemoveKind::File) => Some(Change::Removed),
            _ => None,
        }
    }

    /// Apply one notify event to the stored lists.
    fn handle_event(event: &Event, lists: &SharedLists) -> Vec<SourceEvent> {
        let Some(change) = Self::classify(&event.kind) else {
            return Vec::new();
        };

        event
            .paths
            .iter()
            .filter(|p| is_markdown(p))
            .filter_map(|path| match change {
                // Renames report the old name too; it no longer exists.
                Change::Written if path.exists() => Some(Self::reimport(path, lists)),
                Change::Written => None,
                Change::Removed => Some(Self::forget(path, lists)),
            })
            .collect()
    }

    fn reimport(path: &Path, lists: &SharedLists) -> SourceEvent {
        let source_path = path.to_string_lossy().to_string();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("failed to read {}: {}", source_path, e);
                return SourceEvent::Rejected {
                    path: source_path,
                    message: e.to_string(),
                };
            }
        };

        let imported = lock_lists(lists).and_then(|mut lists| {
            import_source(&mut lists, path, &content, ImportOptions::default())
        });

        match imported {
            Ok(result) => SourceEvent::Imported {
                path: source_path,
                result,
            },
            Err(e) => {
                tracing::warn!("failed to import {}: {}", source_path, e);
                SourceEvent::Rejected {
                    path: source_path,
                    message: e.message,
                }
            }
        }
    }

    /// A deleted source keeps its stored list; only the file hash is dropped.
    fn forget(path: &Path, lists: &SharedLists) -> SourceEvent {
        use crate::db::SourceRepository;

        let source_path = path.to_string_lossy().to_string();
        match lock_lists(lists) {
            Ok(lists) => {
                if let Err(e) = lists.store().delete_source_file(&source_path) {
                    tracing::warn!("failed to forget {}: {}", source_path, e);
                }
            }
            Err(e) => tracing::warn!("failed to forget {}: {}", source_path, e),
        }
        tracing::info!("source removed: {}", source_path);
        SourceEvent::Removed { path: source_path }
    }
}

impl Default for FileWatcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}
