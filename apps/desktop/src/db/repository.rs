//! Repository pattern for database access.

use crate::db::error::DbError;
use crate::db::schema::{SCHEMA, SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use problemlist_core::types::{CompletionMap, ProblemList};
use problemlist_core::ListStore;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Repository for problem list operations.
pub trait ListRepository {
    fn get_lists(&self) -> Result<Vec<ProblemList>>;
    fn get_list(&self, id: &str) -> Result<Option<ProblemList>>;
    fn upsert_list(&self, list: &ProblemList) -> Result<()>;
    fn delete_list(&self, id: &str) -> Result<bool>;
}

/// Repository for completion flags.
pub trait CompletionRepository {
    fn get_completion(&self) -> Result<CompletionMap>;
    fn set_completion(&self, url: &str, done: bool) -> Result<()>;
}

/// Repository for watched source files.
pub trait SourceRepository {
    fn get_source_file(&self, path: &str) -> Result<Option<SourceFileInfo>>;
    fn update_file_hash(&self, path: &str, hash: &str, last_modified: &str) -> Result<()>;
    fn delete_source_file(&self, path: &str) -> Result<()>;
}

/// Source file sync info.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SourceFileInfo {
    pub file_path: String,
    pub content_hash: String,
    pub last_modified: String,
}

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    pub fn schema_version(&self) -> Result<i32> {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
            .map_err(Into::into)
    }

    fn row_to_list(row: &rusqlite::Row) -> rusqlite::Result<ListRow> {
        Ok(ListRow {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            priority: row.get(3)?,
            source: row.get(4)?,
            source_path: row.get(5)?,
            categories: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }
}

const LIST_COLUMNS: &str =
    "id, title, description, priority, source, source_path, categories, created_at, updated_at";

/// Raw `problem_lists` row before JSON and timestamp decoding.
struct ListRow {
    id: String,
    title: String,
    description: String,
    priority: i32,
    source: String,
    source_path: Option<String>,
    categories: String,
    created_at: String,
    updated_at: String,
}

impl ListRow {
    fn into_list(self) -> Result<ProblemList> {
        Ok(ProblemList {
            categories: serde_json::from_str(&self.categories)?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            id: self.id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            source: self.source,
            source_path: self.source_path,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidData(format!("bad timestamp {value:?}: {e}")))
}

impl ListRepository for SqliteRepository {
    fn get_lists(&self) -> Result<Vec<ProblemList>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LIST_COLUMNS} FROM problem_lists ORDER BY created_at, id"
        ))?;

        let rows = stmt
            .query_map([], Self::row_to_list)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(ListRow::into_list).collect()
    }

    fn get_list(&self, id: &str) -> Result<Option<ProblemList>> {
        self.conn
            .query_row(
                &format!("SELECT {LIST_COLUMNS} FROM problem_lists WHERE id = ?1"),
                params![id],
                Self::row_to_list,
            )
            .optional()?
            .map(ListRow::into_list)
            .transpose()
    }

    fn upsert_list(&self, list: &ProblemList) -> Result<()> {
        let categories = serde_json::to_string(&list.categories)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO problem_lists (id, title, description, priority, source, source_path, categories, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                list.id,
                list.title,
                list.description,
                list.priority,
                list.source,
                list.source_path,
                categories,
                list.created_at.to_rfc3339(),
                list.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn delete_list(&self, id: &str) -> Result<bool> {
        let count = self
            .conn
            .execute("DELETE FROM problem_lists WHERE id = ?1", params![id])?;
        Ok(count > 0)
    }
}

impl CompletionRepository for SqliteRepository {
    fn get_completion(&self) -> Result<CompletionMap> {
        let mut stmt = self.conn.prepare("SELECT url, done FROM completion")?;
        let entries = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?)))?
            .collect::<std::result::Result<CompletionMap, _>>()?;
        Ok(entries)
    }

    fn set_completion(&self, url: &str, done: bool) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR REPLACE INTO completion (url, done, updated_at) VALUES (?1, ?2, ?3)",
            params![url, done, now],
        )?;
        Ok(())
    }
}

impl SourceRepository for SqliteRepository {
    fn get_source_file(&self, path: &str) -> Result<Option<SourceFileInfo>> {
        self.conn
            .query_row(
                "SELECT file_path, content_hash, last_modified FROM source_files WHERE file_path = ?1",
                params![path],
                |row| {
                    Ok(SourceFileInfo {
                        file_path: row.get(0)?,
                        content_hash: row.get(1)?,
                        last_modified: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    fn update_file_hash(&self, path: &str, hash: &str, last_modified: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO source_files (file_path, content_hash, last_modified)
             VALUES (?1, ?2, ?3)",
            params![path, hash, last_modified],
        )?;
        Ok(())
    }

    fn delete_source_file(&self, path: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM source_files WHERE file_path = ?1",
            params![path],
        )?;
        Ok(())
    }
}

impl ListStore for SqliteRepository {
    fn load_lists(&self) -> problemlist_core::Result<Vec<ProblemList>> {
        Ok(self.get_lists()?)
    }

    fn save_list(&mut self, list: &ProblemList) -> problemlist_core::Result<()> {
        Ok(self.upsert_list(list)?)
    }

    fn delete_list(&mut self, id: &str) -> problemlist_core::Result<()> {
        ListRepository::delete_list(self, id)?;
        Ok(())
    }

    fn load_completion(&self) -> problemlist_core::Result<CompletionMap> {
        Ok(self.get_completion()?)
    }

    fn save_completion(&mut self, url: &str, done: bool) -> problemlist_core::Result<()> {
        Ok(self.set_completion(url, done)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use problemlist_core::parse;

    fn sample_list(id: &str) -> ProblemList {
        let source = "### 数组\n|[1. 两数之和](https://leetcode.cn/problems/two-sum/)|[题解](https://x.com/a)|经典|";
        let now = Utc::now();
        ProblemList {
            id: id.to_string(),
            title: "Hot 100".to_string(),
            description: "热题".to_string(),
            priority: 3,
            source: source.to_string(),
            source_path: Some("/lists/hot100.md".to_string()),
            categories: parse(source),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn initializes_schema_version() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        assert_eq!(repo.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn list_round_trips_through_json_column() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let list = sample_list("a");
        repo.upsert_list(&list).unwrap();

        let loaded = repo.get_list("a").unwrap().unwrap();
        assert_eq!(loaded.categories, list.categories);
        assert_eq!(loaded.source_path, list.source_path);
        assert_eq!(loaded.created_at.timestamp_micros(), list.created_at.timestamp_micros());
        assert_eq!(repo.get_lists().unwrap().len(), 1);
    }

    #[test]
    fn upsert_replaces_existing_list() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let mut list = sample_list("a");
        repo.upsert_list(&list).unwrap();

        list.title = "Renamed".to_string();
        repo.upsert_list(&list).unwrap();

        let lists = repo.get_lists().unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].title, "Renamed");
    }

    #[test]
    fn delete_reports_missing_rows() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.upsert_list(&sample_list("a")).unwrap();
        assert!(ListRepository::delete_list(&repo, "a").unwrap());
        assert!(!ListRepository::delete_list(&repo, "a").unwrap());
        assert!(repo.get_list("a").unwrap().is_none());
    }

    #[test]
    fn completion_flags_persist() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.set_completion("https://leetcode.cn/problems/two-sum/", true).unwrap();
        repo.set_completion("https://leetcode.cn/problems/3sum/", false).unwrap();
        repo.set_completion("https://leetcode.cn/problems/3sum/", true).unwrap();

        let completion = repo.get_completion().unwrap();
        assert_eq!(completion.len(), 2);
        assert!(completion.values().all(|done| *done));
    }

    #[test]
    fn source_file_hashes() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        assert!(repo.get_source_file("/lists/hot100.md").unwrap().is_none());

        repo.update_file_hash("/lists/hot100.md", "abc", "2026-01-01T00:00:00+00:00").unwrap();
        let info = repo.get_source_file("/lists/hot100.md").unwrap().unwrap();
        assert_eq!(info.content_hash, "abc");

        repo.delete_source_file("/lists/hot100.md").unwrap();
        assert!(repo.get_source_file("/lists/hot100.md").unwrap().is_none());
    }

    #[test]
    fn corrupt_categories_surface_as_error() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.upsert_list(&sample_list("a")).unwrap();
        repo.conn
            .execute("UPDATE problem_lists SET categories = 'nope' WHERE id = 'a'", [])
            .unwrap();
        assert!(matches!(repo.get_list("a"), Err(DbError::Json(_))));
    }
}
