//! SQLite pool lifecycle and idempotent schema setup.
//!
//! `Storage` is opened once in `main`, shared through `AppContext`, and
//! closed on shutdown — the registry never touches an ambient global handle.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::SqlitePool;
use std::path::Path;

/// Owns the shared SQLite pool.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open (creating if absent) the database at `path` and ensure the schema.
    pub async fn open(path: &Path) -> Result<Self> {
        let opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePool::connect_with(opts)
            .await
            .with_context(|| format!("failed to open database at '{}'", path.display()))?;

        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// In-memory database for tests. Same schema path as production.
    ///
    /// Pinned to a single never-recycled connection: each new connection to
    /// `sqlite::memory:` would otherwise see its own empty database.
    pub async fn open_in_memory() -> Result<Self> {
        use sqlx::sqlite::SqlitePoolOptions;
        use std::str::FromStr;
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await
            .context("failed to open in-memory database")?;
        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Hand out a clone of the pool for a storage wrapper.
    pub fn clone_pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Close the pool, waiting for in-flight queries to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Create the registry table and its uniqueness constraint if absent.
///
/// Safe to run on every startup. AUTOINCREMENT keeps surrogate ids from ever
/// being reused.
async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS presentes (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            presente      TEXT NOT NULL UNIQUE,
            link1         TEXT NOT NULL DEFAULT '',
            link2         TEXT NOT NULL DEFAULT '',
            cores         TEXT NOT NULL DEFAULT '',
            escolhido_por TEXT,
            criado_em     TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("failed to create presentes table")?;

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_presentes_presente ON presentes(presente)")
        .execute(pool)
        .await
        .context("failed to create unique name index")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("giftd.db");

        let storage = Storage::open(&path).await.unwrap();
        // Re-running setup against the same pool must not fail.
        ensure_schema(&storage.clone_pool()).await.unwrap();
        storage.close().await;

        // Reopening the same file must not fail either.
        let storage = Storage::open(&path).await.unwrap();
        storage.close().await;
    }

    #[tokio::test]
    async fn test_unique_index_rejects_duplicate_names() {
        let storage = Storage::open_in_memory().await.unwrap();
        let pool = storage.clone_pool();

        sqlx::query("INSERT INTO presentes (presente, criado_em) VALUES ('Panela', 'now')")
            .execute(&pool)
            .await
            .unwrap();

        let dup = sqlx::query("INSERT INTO presentes (presente, criado_em) VALUES ('Panela', 'now')")
            .execute(&pool)
            .await;
        assert!(dup.is_err(), "duplicate name must violate the unique index");
    }
}
