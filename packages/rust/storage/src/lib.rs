//! libSQL storage for the docset search index (`docSet.dsidx`).
//!
//! The [`SearchIndex`] struct wraps a local libSQL database holding the
//! single `searchIndex(id, name, type, path)` table documentation browsers
//! query. The unique `(name, type, path)` anchor is the only consistency
//! guarantee: a duplicate insert is reported as
//! [`DashifyError::IndexConstraint`] and never ignored.

mod migrations;

use std::path::Path;

use dashify_shared::{DashifyError, OutputFile, Result};
use libsql::{Connection, Database, params};

/// Handle on an open search index file.
pub struct SearchIndex {
    #[allow(dead_code)]
    db: Database,
    conn: Connection,
}

impl SearchIndex {
    /// Open or create an index at `path` and ensure its schema exists.
    pub async fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DashifyError::io(parent, e))?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(DashifyError::storage)?;

        let conn = db.connect().map_err(DashifyError::storage)?;

        let index = Self { db, conn };
        index.run_migrations().await?;
        Ok(index)
    }

    /// Apply schema steps newer than the file's `user_version`.
    async fn run_migrations(&self) -> Result<()> {
        let current_version = self.get_schema_version().await;

        for migration in migrations::all_migrations() {
            if migration.version > current_version {
                tracing::debug!(
                    version = migration.version,
                    description = migration.description,
                    "creating search index schema"
                );
                self.conn
                    .execute_batch(migration.sql)
                    .await
                    .map_err(|e| {
                        DashifyError::storage(format!(
                            "schema v{} failed: {e}",
                            migration.version
                        ))
                    })?;
            }
        }
        Ok(())
    }

    /// Current `user_version`, or 0 for a fresh file.
    async fn get_schema_version(&self) -> u32 {
        let result = self.conn.query("PRAGMA user_version", params![]).await;

        match result {
            Ok(mut rows) => {
                if let Ok(Some(row)) = rows.next().await {
                    row.get::<u32>(0).unwrap_or(0)
                } else {
                    0
                }
            }
            Err(_) => 0,
        }
    }

    // -----------------------------------------------------------------------
    // Entries
    // -----------------------------------------------------------------------

    /// Insert one `(name, type, path)` row.
    pub async fn insert(&self, entry: &OutputFile) -> Result<()> {
        tracing::trace!(
            name = ?entry.name,
            entry_type = %entry.entry_type,
            path = %entry.path,
            "INSERT INTO searchIndex"
        );
        self.conn
            .execute(
                "INSERT INTO searchIndex (name, type, path) VALUES (?1, ?2, ?3)",
                params![
                    entry.name.as_deref(),
                    entry.entry_type.as_str(),
                    entry.path.as_str(),
                ],
            )
            .await
            .map_err(|e| insert_error(e, entry))?;
        Ok(())
    }

    /// Insert every entry in order, stopping at the first failure.
    pub async fn insert_all(&self, entries: &[OutputFile]) -> Result<usize> {
        for entry in entries {
            self.insert(entry).await?;
        }
        Ok(entries.len())
    }

    /// All rows in insertion order.
    pub async fn entries(&self) -> Result<Vec<OutputFile>> {
        let mut rows = self
            .conn
            .query(
                "SELECT name, type, path FROM searchIndex ORDER BY id",
                params![],
            )
            .await
            .map_err(DashifyError::storage)?;

        let mut results = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            results.push(OutputFile {
                name: row.get::<String>(0).ok(),
                entry_type: row.get::<String>(1).map_err(DashifyError::storage)?,
                path: row.get::<String>(2).map_err(DashifyError::storage)?,
            });
        }
        Ok(results)
    }

    /// Number of rows.
    pub async fn count(&self) -> Result<usize> {
        let mut rows = self
            .conn
            .query("SELECT COUNT(*) FROM searchIndex", params![])
            .await
            .map_err(DashifyError::storage)?;

        match rows.next().await {
            Ok(Some(row)) => Ok(row.get::<i64>(0).map_err(DashifyError::storage)? as usize),
            Ok(None) => Ok(0),
            Err(e) => Err(DashifyError::storage(e)),
        }
    }
}

/// Classify an insert failure; unique violations name the offending triple.
fn insert_error(err: libsql::Error, entry: &OutputFile) -> DashifyError {
    if err.to_string().contains("UNIQUE constraint failed") {
        DashifyError::IndexConstraint {
            name: entry.name.clone(),
            entry_type: entry.entry_type.clone(),
            path: entry.path.clone(),
        }
    } else {
        DashifyError::storage(err)
    }
}
