//! Error types for problemlist-core.

use thiserror::Error;

/// Result type alias using ListError.
pub type Result<T> = std::result::Result<T, ListError>;

/// Errors raised by list management.
///
/// The table parser itself never fails; an unusable document only shows up
/// here, when a caller tries to turn it into a stored list.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("could not parse content — check formatting")]
    EmptyContent,

    #[error("list title must not be empty")]
    InvalidTitle,

    #[error("list not found: {0}")]
    ListNotFound(String),

    #[error("store error: {0}")]
    Store(String),
}
