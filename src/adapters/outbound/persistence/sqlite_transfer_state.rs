use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::str::FromStr;

use crate::{
    domain::{
        errors::{StateError, StateResult},
        value_objects::LogId,
    },
    ports::repositories::TransferStateRepository,
};

/// SQLite-backed transfer state
#[derive(Clone)]
pub struct SqliteTransferState {
    pool: SqlitePool,
}

impl SqliteTransferState {
    /// Open (creating if needed) the database file at `path`
    pub async fn open(path: &Path) -> StateResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StateError::Open {
                    path: path.to_path_buf(),
                    source,
                })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full);

        Self::connect(options).await
    }

    /// Private in-memory database, gone when the value is dropped
    pub async fn in_memory() -> StateResult<Self> {
        Self::connect(SqliteConnectOptions::from_str("sqlite::memory:")?).await
    }

    async fn connect(options: SqliteConnectOptions) -> StateResult<Self> {
        // One long-lived connection: the process is the only writer
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let state = Self { pool };
        state.migrate().await?;
        Ok(state)
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transferred_logs (
                identifier TEXT PRIMARY KEY NOT NULL,
                recorded_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl TransferStateRepository for SqliteTransferState {
    async fn contains(&self, id: &LogId) -> StateResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transferred_logs WHERE identifier = ?")
                .bind(id.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    async fn record(&self, id: &LogId) -> StateResult<()> {
        sqlx::query("INSERT OR IGNORE INTO transferred_logs (identifier, recorded_at) VALUES (?, ?)")
            .bind(id.as_str())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn len(&self) -> StateResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transferred_logs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_is_idempotent() {
        let state = SqliteTransferState::in_memory().await.unwrap();
        let id = LogId::new("build-api", "12").unwrap();

        assert!(!state.contains(&id).await.unwrap());
        state.record(&id).await.unwrap();
        state.record(&id).await.unwrap();

        assert!(state.contains(&id).await.unwrap());
        assert_eq!(state.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");
        let id = LogId::new("deploy-web", "5").unwrap();

        {
            let state = SqliteTransferState::open(&path).await.unwrap();
            state.record(&id).await.unwrap();
            state.pool.close().await;
        }

        let state = SqliteTransferState::open(&path).await.unwrap();
        assert!(state.contains(&id).await.unwrap());
        assert_eq!(state.len().await.unwrap(), 1);
    }
}
