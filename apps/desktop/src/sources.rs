//! Importing Markdown source files into stored lists.

use crate::commands::CommandError;
use crate::db::{SourceRepository, SqliteRepository};
use chrono::Utc;
use problemlist_core::{ListCollection, ListDraft};
use sha2::{Digest, Sha256};
use std::path::Path;

/// What an import did to the stored lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportOutcome {
    Created,
    Refreshed,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ImportResult {
    pub list_id: String,
    pub title: String,
    pub source_path: String,
    pub problems: usize,
    pub outcome: ImportOutcome,
}

/// Metadata for lists created from a file.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub title: Option<String>,
    pub description: String,
    pub priority: i32,
}

/// Hex SHA-256 of file content.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Whether `path` looks like a Markdown list source.
pub fn is_markdown(path: &Path) -> bool {
    path.extension().map(|ext| ext == "md").unwrap_or(false)
}

/// Default list title for a source file: its stem.
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string()
}

/// Create or refresh the list tracking `path`.
///
/// A file that is already tracked keeps its list id and metadata; only its
/// content is re-parsed, and not even that when the content hash is unchanged.
pub fn import_source(
    lists: &mut ListCollection<SqliteRepository>,
    path: &Path,
    content: &str,
    options: ImportOptions,
) -> Result<ImportResult, CommandError> {
    let source_path = path.to_string_lossy().to_string();
    let hash = hash_content(content);
    let existing = lists
        .find_by_source_path(&source_path)
        .map(|l| l.id.clone());

    let (list, outcome) = match existing {
        Some(id) => {
            let stored = lists.store().get_source_file(&source_path)?;
            if stored.map(|info| info.content_hash == hash).unwrap_or(false) {
                tracing::debug!("source unchanged: {}", source_path);
                let list = lists
                    .get(&id)
                    .ok_or_else(|| CommandError::new(format!("list not found: {id}")))?;
                return Ok(summarize(list, &source_path, ImportOutcome::Unchanged));
            }
            (lists.refresh_source(&id, content)?, ImportOutcome::Refreshed)
        }
        None => {
            let draft = ListDraft {
                title: options.title.unwrap_or_else(|| title_from_path(path)),
                description: options.description,
                priority: options.priority,
                source: content.to_string(),
                source_path: Some(source_path.clone()),
            };
            (lists.create(draft)?, ImportOutcome::Created)
        }
    };
    let result = summarize(list, &source_path, outcome);

    lists
        .store()
        .update_file_hash(&source_path, &hash, &Utc::now().to_rfc3339())?;

    tracing::info!(
        "{:?} list {} from {} ({} problems)",
        outcome,
        result.list_id,
        source_path,
        result.problems
    );
    Ok(result)
}

fn summarize(
    list: &problemlist_core::ProblemList,
    source_path: &str,
    outcome: ImportOutcome,
) -> ImportResult {
    ImportResult {
        list_id: list.id.clone(),
        title: list.title.clone(),
        source_path: source_path.to_string(),
        problems: list.problem_count(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SOURCE: &str = "### 数组\n|[1. 两数之和](https://leetcode.cn/problems/two-sum/)|||";

    fn lists() -> ListCollection<SqliteRepository> {
        ListCollection::load(SqliteRepository::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn hash_is_stable_hex() {
        let hash = hash_content("abc");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_content("abc"));
        assert_ne!(hash, hash_content("abd"));
    }

    #[test]
    fn path_helpers() {
        assert!(is_markdown(Path::new("/lists/hot100.md")));
        assert!(!is_markdown(Path::new("/lists/hot100.txt")));
        assert_eq!(title_from_path(Path::new("/lists/hot100.md")), "hot100");
    }

    #[test]
    fn import_then_reimport() {
        let mut lists = lists();
        let path = PathBuf::from("/lists/hot100.md");

        let first = import_source(&mut lists, &path, SOURCE, ImportOptions::default()).unwrap();
        assert_eq!(first.outcome, ImportOutcome::Created);
        assert_eq!(first.title, "hot100");
        assert_eq!(first.problems, 1);

        let same = import_source(&mut lists, &path, SOURCE, ImportOptions::default()).unwrap();
        assert_eq!(same.outcome, ImportOutcome::Unchanged);
        assert_eq!(same.list_id, first.list_id);

        let grown = format!("{SOURCE}\n|[15. 三数之和](https://leetcode.cn/problems/3sum/)|||");
        let refreshed = import_source(&mut lists, &path, &grown, ImportOptions::default()).unwrap();
        assert_eq!(refreshed.outcome, ImportOutcome::Refreshed);
        assert_eq!(refreshed.list_id, first.list_id);
        assert_eq!(refreshed.problems, 2);
        assert_eq!(lists.len(), 1);
    }

    #[test]
    fn import_uses_given_metadata() {
        let mut lists = lists();
        let options = ImportOptions {
            title: Some("代码随想录".to_string()),
            description: "按专题".to_string(),
            priority: 7,
        };
        let result = import_source(&mut lists, Path::new("/lists/dmsxl.md"), SOURCE, options).unwrap();
        let list = lists.get(&result.list_id).unwrap();
        assert_eq!(list.title, "代码随想录");
        assert_eq!(list.priority, 7);
        assert_eq!(list.description, "按专题");
    }

    #[test]
    fn import_rejects_unparseable_file() {
        let mut lists = lists();
        let err = import_source(&mut lists, Path::new("/lists/empty.md"), "# nothing", ImportOptions::default())
            .unwrap_err();
        assert!(err.message.contains("could not parse content"));
        assert!(lists.is_empty());
    }
}
