//! List-related commands.

use crate::sources::{import_source, is_markdown, ImportOptions, ImportResult};
use crate::state::AppState;
use problemlist_core::{list_progress, preview, ListDraft, ParseResult, ProblemList};
use std::fs;
use std::path::Path;

use super::CommandError;

/// Sidebar entry for one list.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ListSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: i32,
    /// Distinct problem URLs, matching the list's progress total.
    pub problem_count: usize,
    pub completed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

/// List all lists in sidebar order.
pub async fn list_lists(state: &AppState) -> Result<Vec<ListSummary>, CommandError> {
    let lists = state.lists()?;
    let summaries = lists
        .sorted()
        .into_iter()
        .map(|list| {
            let progress = list_progress(list, lists.completion());
            ListSummary {
                id: list.id.clone(),
                title: list.title.clone(),
                description: list.description.clone(),
                priority: list.priority,
                problem_count: progress.total,
                completed: progress.completed,
                source_path: list.source_path.clone(),
            }
        })
        .collect();
    Ok(summaries)
}

/// Get one list with its categories.
pub async fn get_list(id: String, state: &AppState) -> Result<Option<ProblemList>, CommandError> {
    let lists = state.lists()?;
    Ok(lists.get(&id).cloned())
}

/// Parse editor content for live preview.
pub async fn preview_content(source: String) -> Result<ParseResult, CommandError> {
    preview(&source).map_err(Into::into)
}

/// Create a list, or replace the list with `id`.
pub async fn save_list(
    id: Option<String>,
    draft: ListDraft,
    state: &AppState,
) -> Result<ProblemList, CommandError> {
    let mut lists = state.lists()?;
    let list = match id {
        Some(id) => lists.update(&id, draft)?,
        None => lists.create(draft)?,
    };
    tracing::info!("saved list {} ({} problems)", list.id, list.problem_count());
    Ok(list.clone())
}

/// Delete a list. Completion flags are kept.
pub async fn delete_list(id: String, state: &AppState) -> Result<(), CommandError> {
    let mut lists = state.lists()?;
    let removed = lists.remove(&id)?;
    tracing::info!("deleted list {} ({})", removed.id, removed.title);
    Ok(())
}

/// Import a Markdown file as a list.
pub async fn import_file(
    file_path: String,
    options: ImportOptions,
    state: &AppState,
) -> Result<ImportResult, CommandError> {
    let path = fs::canonicalize(Path::new(&file_path))?;
    let content = fs::read_to_string(&path)?;

    let mut lists = state.lists()?;
    import_source(&mut lists, &path, &content, options)
}

/// Import all Markdown files from a directory.
///
/// Files that do not parse into any problem are skipped.
pub async fn import_directory(
    dir_path: String,
    state: &AppState,
) -> Result<Vec<ImportResult>, CommandError> {
    let dir = fs::canonicalize(Path::new(&dir_path))?;
    let mut paths = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let path = entry?.path();
        if is_markdown(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut results = Vec::with_capacity(paths.len());
    let mut lists = state.lists()?;
    for path in paths {
        let content = fs::read_to_string(&path)?;
        match import_source(&mut lists, &path, &content, ImportOptions::default()) {
            Ok(result) => results.push(result),
            Err(e) => tracing::warn!("skipping {}: {}", path.display(), e),
        }
    }

    Ok(results)
}
