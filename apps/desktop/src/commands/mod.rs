//! Commands exposed to the front end.

pub mod lists;
pub mod progress;
pub mod watcher;

pub use lists::{
    delete_list, get_list, import_directory, import_file, list_lists, preview_content, save_list,
    ListSummary,
};
pub use progress::{get_all_progress, get_progress, set_completion, toggle_completion};
pub use watcher::{get_watched_directories, start_watching, stop_watching};

/// Error returned to the front end as a plain message.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<crate::db::DbError> for CommandError {
    fn from(e: crate::db::DbError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<problemlist_core::ListError> for CommandError {
    fn from(e: problemlist_core::ListError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<crate::watcher::WatchError> for CommandError {
    fn from(e: crate::watcher::WatchError) -> Self {
        Self { message: e.to_string() }
    }
}
