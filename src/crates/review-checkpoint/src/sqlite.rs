//! SQLite checkpoint storage
//!
//! [`SqliteCheckpointStore`] is the durable default: every run occupies one row
//! of `run_checkpoints`, keyed by `run_id`. A save is a single
//! `INSERT ... ON CONFLICT DO UPDATE` statement, which SQLite applies
//! atomically, so `start` and a later `respond` in another process always see a
//! complete snapshot.
//!
//! The full record is stored as JSON in `record`; `stage`, `iteration_count`
//! and the timestamps are duplicated into columns for listing and ad-hoc
//! inspection with the `sqlite3` shell.

use crate::{
    checkpoint::{Checkpoint, CheckpointSummary},
    error::{CheckpointError, Result},
    run_id::RunId,
    serializer::{JsonSerializer, SerializerProtocol},
    traits::CheckpointStore,
};
use async_trait::async_trait;
use chrono::SecondsFormat;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS run_checkpoints (
    run_id TEXT PRIMARY KEY NOT NULL,
    version INTEGER NOT NULL,
    stage TEXT NOT NULL,
    iteration_count INTEGER NOT NULL,
    record TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

/// SQLite-backed checkpoint store
#[derive(Debug, Clone)]
pub struct SqliteCheckpointStore {
    pool: Arc<SqlitePool>,
    serializer: JsonSerializer,
}

impl SqliteCheckpointStore {
    /// Open (creating if needed) a database file and ensure the schema exists
    ///
    /// # Arguments
    /// * `database_path` - Path to the SQLite database file
    pub async fn open<P: AsRef<Path>>(database_path: P) -> Result<Self> {
        let path = database_path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CheckpointError::Storage(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!(path = %path.display(), "Checkpoint database connection established");
        Self::with_pool(pool).await
    }

    /// Private in-memory database, mainly for tests
    pub async fn in_memory() -> Result<Self> {
        // Every connection to :memory: is a separate database, so pin one.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self {
            pool: Arc::new(pool),
            serializer: JsonSerializer::new(),
        })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn decode(&self, record: &str) -> Result<Checkpoint> {
        self.serializer.loads_checkpoint(record.as_bytes())
    }
}

#[async_trait]
impl CheckpointStore for SqliteCheckpointStore {
    async fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        checkpoint.validate()?;
        let record = String::from_utf8(self.serializer.dumps(checkpoint)?)
            .map_err(|e| CheckpointError::Storage(format!("record is not UTF-8: {}", e)))?;

        sqlx::query(
            "INSERT INTO run_checkpoints
                (run_id, version, stage, iteration_count, record, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(run_id) DO UPDATE SET
                version = excluded.version,
                stage = excluded.stage,
                iteration_count = excluded.iteration_count,
                record = excluded.record,
                updated_at = excluded.updated_at",
        )
        .bind(checkpoint.run_id.as_str())
        .bind(checkpoint.v as i64)
        .bind(checkpoint.stage.label())
        .bind(checkpoint.state.iteration_count as i64)
        .bind(&record)
        .bind(checkpoint.created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .bind(checkpoint.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(self.pool.as_ref())
        .await?;

        debug!(
            run_id = %checkpoint.run_id,
            stage = checkpoint.stage.label(),
            "Checkpoint written"
        );
        Ok(())
    }

    async fn load(&self, run_id: &RunId) -> Result<Option<Checkpoint>> {
        let row = sqlx::query("SELECT record FROM run_checkpoints WHERE run_id = ?")
            .bind(run_id.as_str())
            .fetch_optional(self.pool.as_ref())
            .await?;

        match row {
            Some(row) => {
                let record: String = row.try_get("record")?;
                Ok(Some(self.decode(&record)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<CheckpointSummary>> {
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        let rows = sqlx::query(
            "SELECT run_id, record FROM run_checkpoints
             ORDER BY updated_at DESC, run_id ASC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in rows {
            let run_id: String = row.try_get("run_id")?;
            let record: String = row.try_get("record")?;
            match self.decode(&record) {
                Ok(checkpoint) => summaries.push(checkpoint.summary()),
                Err(e) => warn!(run_id = %run_id, error = %e, "Skipping unreadable checkpoint"),
            }
        }
        Ok(summaries)
    }

    async fn delete(&self, run_id: &RunId) -> Result<()> {
        sqlx::query("DELETE FROM run_checkpoints WHERE run_id = ?")
            .bind(run_id.as_str())
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
