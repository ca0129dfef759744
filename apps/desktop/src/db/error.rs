//! Database error types.

use problemlist_core::ListError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<DbError> for ListError {
    fn from(e: DbError) -> Self {
        ListError::Store(e.to_string())
    }
}
