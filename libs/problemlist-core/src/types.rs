//! Core types for problem lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label shown for a secondary link that carries no text of its own.
pub const DEFAULT_SECONDARY_LABEL: &str = "题解";

/// One practice problem parsed from a table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecord {
    pub title: String,
    /// Identity key for completion tracking.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ProblemRecord {
    /// Label for the secondary link, falling back to the default.
    pub fn secondary_label(&self) -> Option<&str> {
        self.secondary_url.as_ref()?;
        Some(
            self.secondary_text
                .as_deref()
                .filter(|text| !text.is_empty())
                .unwrap_or(DEFAULT_SECONDARY_LABEL),
        )
    }
}

/// Named, ordered group of problems sourced from one heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    pub problems: Vec<ProblemRecord>,
}

impl Category {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            problems: Vec::new(),
        }
    }
}

/// Categories in order of first appearance.
pub type ParseResult = Vec<Category>;

/// Completion flags keyed by problem URL.
pub type CompletionMap = BTreeMap<String, bool>;

/// Stored problem list: one parse result plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemList {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    pub categories: ParseResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProblemList {
    /// Number of problem rows across all categories.
    pub fn problem_count(&self) -> usize {
        self.categories.iter().map(|c| c.problems.len()).sum()
    }

    /// Iterate over every record in category order.
    pub fn problems(&self) -> impl Iterator<Item = &ProblemRecord> {
        self.categories.iter().flat_map(|c| c.problems.iter())
    }
}

/// Authoring input for creating or replacing a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: i32,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

impl ListDraft {
    /// Create a draft with only the title and source set.
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            ..Default::default()
        }
    }
}
