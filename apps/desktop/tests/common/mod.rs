//! Shared helpers for desktop integration tests.

#![allow(dead_code)]

pub mod fixtures;

use problemlist_desktop::state::AppState;
use tempfile::TempDir;

/// Fresh state over an in-memory database.
pub fn state() -> AppState {
    problemlist_desktop::open_memory_state().expect("in-memory state")
}

/// Write `content` to `name` inside `dir` and return the file path as a string.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write fixture");
    path.to_string_lossy().to_string()
}

pub fn path_string(dir: &TempDir) -> String {
    dir.path().to_string_lossy().to_string()
}
