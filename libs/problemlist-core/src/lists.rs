//! Named problem lists and per-problem completion.
//!
//! A [`ListCollection`] is loaded from a [`ListStore`] once and writes every
//! mutation back through it. Completion is keyed by problem URL, so it
//! survives re-parsing and is shared by lists that contain the same problem.

use crate::error::{ListError, Result};
use crate::parser;
use crate::progress::{list_progress, ListProgress};
use crate::store::ListStore;
use crate::types::{CompletionMap, ListDraft, ParseResult, ProblemList, ProblemRecord};
use chrono::Utc;
use uuid::Uuid;

/// Parse `source` for an authoring preview.
///
/// Fails with [`ListError::EmptyContent`] when the text yields no problems.
pub fn preview(source: &str) -> Result<ParseResult> {
    let categories = parser::parse(source);
    if categories.iter().all(|c| c.problems.is_empty()) {
        return Err(ListError::EmptyContent);
    }
    Ok(categories)
}

/// In-memory view of all lists backed by a store.
pub struct ListCollection<S: ListStore> {
    store: S,
    lists: Vec<ProblemList>,
    completion: CompletionMap,
}

impl<S: ListStore> ListCollection<S> {
    /// Load lists and completion flags from `store`.
    pub fn load(store: S) -> Result<Self> {
        let lists = store.load_lists()?;
        let completion = store.load_completion()?;
        Ok(Self {
            store,
            lists,
            completion,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ProblemList> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn find_by_source_path(&self, path: &str) -> Option<&ProblemList> {
        self.lists
            .iter()
            .find(|l| l.source_path.as_deref() == Some(path))
    }

    /// Lists by priority (highest first), then title.
    pub fn sorted(&self) -> Vec<&ProblemList> {
        let mut lists: Vec<&ProblemList> = self.lists.iter().collect();
        lists.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.title.cmp(&b.title)));
        lists
    }

    /// First record with `url` across all lists.
    pub fn problem(&self, url: &str) -> Option<&ProblemRecord> {
        self.lists
            .iter()
            .flat_map(|l| l.problems())
            .find(|p| p.url == url)
    }

    /// Validate and store a new list built from `draft`.
    pub fn create(&mut self, draft: ListDraft) -> Result<&ProblemList> {
        let title = validate_title(&draft.title)?;
        let categories = preview(&draft.source)?;
        let now = Utc::now();

        let list = ProblemList {
            id: Uuid::new_v4().to_string(),
            title,
            description: draft.description,
            priority: draft.priority,
            source: draft.source,
            source_path: draft.source_path,
            categories,
            created_at: now,
            updated_at: now,
        };

        self.store.save_list(&list)?;
        let id = list.id.clone();
        self.lists.push(list);
        self.lists.last().ok_or(ListError::ListNotFound(id))
    }

    /// Replace metadata and content of an existing list.
    pub fn update(&mut self, id: &str, draft: ListDraft) -> Result<&ProblemList> {
        let title = validate_title(&draft.title)?;
        let categories = preview(&draft.source)?;
        let idx = self.position(id)?;

        let mut list = self.lists[idx].clone();
        list.title = title;
        list.description = draft.description;
        list.priority = draft.priority;
        list.source = draft.source;
        list.source_path = draft.source_path;
        list.categories = categories;
        list.updated_at = Utc::now();

        self.store.save_list(&list)?;
        self.lists[idx] = list;
        Ok(&self.lists[idx])
    }

    /// Re-parse a list after its source text changed, keeping metadata.
    ///
    /// An unusable new source leaves the stored list untouched.
    pub fn refresh_source(&mut self, id: &str, source: &str) -> Result<&ProblemList> {
        let idx = self.position(id)?;
        let categories = preview(source)?;

        let mut list = self.lists[idx].clone();
        list.source = source.to_string();
        list.categories = categories;
        list.updated_at = Utc::now();

        self.store.save_list(&list)?;
        self.lists[idx] = list;
        Ok(&self.lists[idx])
    }

    pub fn remove(&mut self, id: &str) -> Result<ProblemList> {
        let idx = self.position(id)?;
        self.store.delete_list(id)?;
        Ok(self.lists.remove(idx))
    }

    pub fn is_completed(&self, url: &str) -> bool {
        self.completion.get(url).copied().unwrap_or(false)
    }

    pub fn set_completed(&mut self, url: &str, done: bool) -> Result<()> {
        self.store.save_completion(url, done)?;
        self.completion.insert(url.to_string(), done);
        Ok(())
    }

    /// Flip the completion flag for `url` and return the new value.
    pub fn toggle(&mut self, url: &str) -> Result<bool> {
        let done = !self.is_completed(url);
        self.set_completed(url, done)?;
        Ok(done)
    }

    pub fn completion(&self) -> &CompletionMap {
        &self.completion
    }

    pub fn progress(&self, id: &str) -> Result<ListProgress> {
        let idx = self.position(id)?;
        Ok(list_progress(&self.lists[idx], &self.completion))
    }

    /// Progress for every list in sidebar order.
    pub fn all_progress(&self) -> Vec<ListProgress> {
        self.sorted()
            .into_iter()
            .map(|l| list_progress(l, &self.completion))
            .collect()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.lists
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| ListError::ListNotFound(id.to_string()))
    }
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ListError::InvalidTitle);
    }
    Ok(title.to_string())
}
