//! Core problem-list library shared by the desktop host and its tools.
//!
//! Provides:
//! - Markdown table parser for curated problem lists
//! - List management with per-problem completion keyed by URL
//! - Progress statistics for the sidebar
//! - Shared types (ProblemRecord, Category, ProblemList, etc.)

pub mod error;
pub mod lists;
pub mod parser;
pub mod progress;
pub mod store;
pub mod types;

pub use error::{ListError, Result};
pub use lists::{preview, ListCollection};
pub use parser::parse;
pub use progress::{list_progress, CategoryProgress, ListProgress};
pub use store::{ListStore, MemoryStore};
pub use types::{
    Category, CompletionMap, ListDraft, ParseResult, ProblemList, ProblemRecord,
    DEFAULT_SECONDARY_LABEL,
};
