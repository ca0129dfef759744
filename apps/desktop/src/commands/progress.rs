//! Completion and progress commands.

use crate::state::AppState;
use problemlist_core::ListProgress;

use super::CommandError;

/// Flip completion for a problem URL; returns the new flag.
pub async fn toggle_completion(url: String, state: &AppState) -> Result<bool, CommandError> {
    let mut lists = state.lists()?;
    let done = lists.toggle(&url)?;
    tracing::debug!("completion {} -> {}", url, done);
    Ok(done)
}

pub async fn set_completion(url: String, done: bool, state: &AppState) -> Result<(), CommandError> {
    let mut lists = state.lists()?;
    lists.set_completed(&url, done).map_err(Into::into)
}

pub async fn get_progress(id: String, state: &AppState) -> Result<ListProgress, CommandError> {
    let lists = state.lists()?;
    lists.progress(&id).map_err(Into::into)
}

/// Progress for every list in sidebar order.
pub async fn get_all_progress(state: &AppState) -> Result<Vec<ListProgress>, CommandError> {
    let lists = state.lists()?;
    Ok(lists.all_progress())
}
