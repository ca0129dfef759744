//! File watcher commands.

use crate::state::AppState;
use std::path::PathBuf;

use super::CommandError;

/// Start watching a directory for source changes.
pub async fn start_watching(dir_path: String, state: &AppState) -> Result<(), CommandError> {
    let path = PathBuf::from(&dir_path);

    if !path.exists() {
        return Err(CommandError::new(format!("Directory does not exist: {}", dir_path)));
    }

    if !path.is_dir() {
        return Err(CommandError::new(format!("Path is not a directory: {}", dir_path)));
    }

    // Stored source paths are canonical
    let path = path.canonicalize()?;
    let mut watcher = state.watcher.lock().await;

    if !watcher.is_started() {
        watcher.start(state.lists.clone(), state.events.clone())?;
    }

    watcher.watch(path).map_err(Into::into)
}

/// Stop watching a directory.
pub async fn stop_watching(dir_path: String, state: &AppState) -> Result<(), CommandError> {
    let path = PathBuf::from(&dir_path);
    let path = path.canonicalize().unwrap_or(path);
    let mut watcher = state.watcher.lock().await;
    watcher.unwatch(&path).map_err(Into::into)
}

/// Get the list of currently watched directories.
pub async fn get_watched_directories(state: &AppState) -> Result<Vec<String>, CommandError> {
    let watcher = state.watcher.lock().await;
    Ok(watcher.get_watched_directories())
}
