//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for local SQLite database.
pub const SCHEMA: &str = r#"
-- Problem lists with their raw source and parsed categories (JSON)
CREATE TABLE IF NOT EXISTS problem_lists (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    priority INTEGER NOT NULL DEFAULT 0,
    source TEXT NOT NULL,
    source_path TEXT,
    categories TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Completion flags keyed by problem URL
CREATE TABLE IF NOT EXISTS completion (
    url TEXT PRIMARY KEY,
    done INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL
);

-- Watched source files
CREATE TABLE IF NOT EXISTS source_files (
    file_path TEXT PRIMARY KEY,
    content_hash TEXT NOT NULL,
    last_modified TEXT NOT NULL
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_problem_lists_source ON problem_lists(source_path);
"#;
