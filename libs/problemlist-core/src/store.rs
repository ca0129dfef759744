//! Persistence seam for list management.

use crate::error::Result;
use crate::types::{CompletionMap, ProblemList};
use std::collections::BTreeMap;

/// Key-value storage for problem lists and completion flags.
pub trait ListStore {
    fn load_lists(&self) -> Result<Vec<ProblemList>>;
    fn save_list(&mut self, list: &ProblemList) -> Result<()>;
    fn delete_list(&mut self, id: &str) -> Result<()>;
    fn load_completion(&self) -> Result<CompletionMap>;
    fn save_completion(&mut self, url: &str, done: bool) -> Result<()>;
}

/// Store that keeps everything in memory (for testing and previews).
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    lists: BTreeMap<String, ProblemList>,
    completion: CompletionMap,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListStore for MemoryStore {
    fn load_lists(&self) -> Result<Vec<ProblemList>> {
        let mut lists: Vec<_> = self.lists.values().cloned().collect();
        lists.sort_by_key(|l| l.created_at);
        Ok(lists)
    }

    fn save_list(&mut self, list: &ProblemList) -> Result<()> {
        self.lists.insert(list.id.clone(), list.clone());
        Ok(())
    }

    fn delete_list(&mut self, id: &str) -> Result<()> {
        self.lists.remove(id);
        Ok(())
    }

    fn load_completion(&self) -> Result<CompletionMap> {
        Ok(self.completion.clone())
    }

    fn save_completion(&mut self, url: &str, done: bool) -> Result<()> {
        self.completion.insert(url.to_string(), done);
        Ok(())
    }
}
