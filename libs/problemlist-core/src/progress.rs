//! Completion statistics for the sidebar.

use crate::types::{CompletionMap, ProblemList, ProblemRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Progress within one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub title: String,
    pub total: usize,
    pub completed: usize,
}

/// Progress across a whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListProgress {
    pub list_id: String,
    pub title: String,
    pub total: usize,
    pub completed: usize,
    pub categories: Vec<CategoryProgress>,
}

impl ListProgress {
    /// Completed share in percent, 0.0 when the list is empty.
    pub fn percent(&self) -> f64 {
        percent(self.completed, self.total)
    }
}

impl CategoryProgress {
    pub fn percent(&self) -> f64 {
        percent(self.completed, self.total)
    }
}

fn percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 * 100.0 / total as f64
}

/// Count distinct and completed URLs among `problems`.
fn tally<'a>(
    problems: impl Iterator<Item = &'a ProblemRecord>,
    completion: &CompletionMap,
) -> (usize, usize) {
    let urls: HashSet<&str> = problems.map(|p| p.url.as_str()).collect();
    let completed = urls
        .iter()
        .filter(|url| completion.get(**url).copied().unwrap_or(false))
        .count();
    (urls.len(), completed)
}

/// Compute progress for `list` against a completion map.
pub fn list_progress(list: &ProblemList, completion: &CompletionMap) -> ListProgress {
    let categories = list
        .categories
        .iter()
        .map(|category| {
            let (total, completed) = tally(category.problems.iter(), completion);
            CategoryProgress {
                title: category.title.clone(),
                total,
                completed,
            }
        })
        .collect();

    let (total, completed) = tally(list.problems(), completion);

    ListProgress {
        list_id: list.id.clone(),
        title: list.title.clone(),
        total,
        completed,
        categories,
    }
}
