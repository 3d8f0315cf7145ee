//! Sync queue persistence
//!
//! Queue rows move pending -> running -> completed/failed through simple row
//! updates; the database's own guarantees are the only coordination.

use crate::model::market::Provider;
use crate::model::sync::{SyncJob, SyncStatus};
use sqlx::{PgPool, Row};

/// Creates the sync_queue table
pub async fn initialize_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sync_queue (
            id VARCHAR(32) PRIMARY KEY,
            inventory_id VARCHAR(64) NOT NULL,
            provider VARCHAR(16) NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            attempts INTEGER NOT NULL DEFAULT 0,
            last_error TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Only one pending row per (item, provider); completed/failed history
    // rows accumulate freely.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_sync_queue_pending
        ON sync_queue(inventory_id, provider) WHERE status = 'pending'
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_sync_queue_status ON sync_queue(status, created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Store for sync queue rows
pub struct SyncStore {
    pool: PgPool,
}

impl SyncStore {
    /// Creates a new sync store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Enqueues a job; duplicate pending rows for the same item/provider are
    /// ignored
    ///
    /// Returns the number of rows actually inserted (0 when a pending row
    /// already covered the pair).
    pub async fn enqueue(&self, job: &SyncJob) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO sync_queue (id, inventory_id, provider, status, attempts, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (inventory_id, provider) WHERE status = 'pending' DO NOTHING
            "#,
        )
        .bind(&job.id)
        .bind(&job.inventory_id)
        .bind(job.provider.as_str())
        .bind(job.status.as_str())
        .bind(job.attempts)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Fetches up to `limit` pending jobs, oldest first
    pub async fn list_pending(&self, limit: i64) -> Result<Vec<SyncJob>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, inventory_id, provider, status, attempts, last_error, created_at, updated_at
            FROM sync_queue
            WHERE status = 'pending'
            ORDER BY created_at
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().filter_map(row_to_job).collect())
    }

    /// Updates a job's status, bumping the attempt counter when it starts
    /// running
    pub async fn update_status(
        &self,
        job_id: &str,
        status: SyncStatus,
        last_error: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE sync_queue
            SET status = $2,
                attempts = attempts + CASE WHEN $2 = 'running' THEN 1 ELSE 0 END,
                last_error = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(status.as_str())
        .bind(last_error)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn row_to_job(row: sqlx::postgres::PgRow) -> Option<SyncJob> {
    let provider: String = row.get("provider");
    let status: String = row.get("status");

    Some(SyncJob {
        id: row.get("id"),
        inventory_id: row.get("inventory_id"),
        provider: Provider::from_str_opt(&provider)?,
        status: SyncStatus::from_str_or_pending(&status),
        attempts: row.get("attempts"),
        last_error: row.get("last_error"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
