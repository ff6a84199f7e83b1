//! SQL schema definitions for the docset search index.
//!
//! Versions are tracked in SQLite's `user_version` pragma so the index file
//! holds nothing but the `searchIndex` table documentation browsers read.

/// A schema step with a version and the SQL that reaches it.
pub(crate) struct Migration {
    pub version: u32,
    pub description: &'static str,
    pub sql: &'static str,
}

/// All migrations, in ascending version order.
pub(crate) fn all_migrations() -> Vec<Migration> {
    vec![Migration {
        version: 1,
        description: "searchIndex table with unique (name, type, path) anchor",
        sql: r#"
CREATE TABLE IF NOT EXISTS searchIndex (
    id   INTEGER PRIMARY KEY,
    name TEXT,
    type TEXT,
    path TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS anchor ON searchIndex (name, type, path);

PRAGMA user_version = 1;
"#,
    }]
}
