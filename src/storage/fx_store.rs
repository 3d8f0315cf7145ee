//! FX rate snapshot persistence
//!
//! Snapshots are write-once: `ON CONFLICT DO NOTHING` on (base, quote, as_of)
//! so re-running a sales import never rewrites the rate that applied when the
//! transaction happened.

use crate::model::fx::FxRate;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

/// Creates the fx_rates table
pub async fn initialize_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fx_rates (
            id BIGSERIAL PRIMARY KEY,
            base VARCHAR(3) NOT NULL,
            quote VARCHAR(3) NOT NULL,
            rate DOUBLE PRECISION NOT NULL,
            as_of DATE NOT NULL,
            recorded_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE(base, quote, as_of)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_fx_rates_pair_date ON fx_rates(base, quote, as_of DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Store for FX rate snapshots
pub struct FxStore {
    pool: PgPool,
}

impl FxStore {
    /// Creates a new FX store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records an FX snapshot; a snapshot already present for the same
    /// (base, quote, as_of) is kept untouched
    pub async fn insert_snapshot(&self, rate: &FxRate) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO fx_rates (base, quote, rate, as_of, recorded_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (base, quote, as_of) DO NOTHING
            "#,
        )
        .bind(&rate.base)
        .bind(&rate.quote)
        .bind(rate.rate)
        .bind(rate.as_of)
        .bind(rate.recorded_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetches the snapshot for a currency pair on a specific date
    pub async fn get_snapshot(
        &self,
        base: &str,
        quote: &str,
        as_of: NaiveDate,
    ) -> Result<Option<FxRate>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT base, quote, rate, as_of, recorded_at
            FROM fx_rates
            WHERE base = $1 AND quote = $2 AND as_of = $3
            "#,
        )
        .bind(base)
        .bind(quote)
        .bind(as_of)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_rate))
    }

    /// Fetches the most recent snapshot at or before a date, for pairs where
    /// the exact transaction date was never captured
    pub async fn get_snapshot_at_or_before(
        &self,
        base: &str,
        quote: &str,
        as_of: NaiveDate,
    ) -> Result<Option<FxRate>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT base, quote, rate, as_of, recorded_at
            FROM fx_rates
            WHERE base = $1 AND quote = $2 AND as_of <= $3
            ORDER BY as_of DESC
            LIMIT 1
            "#,
        )
        .bind(base)
        .bind(quote)
        .bind(as_of)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_rate))
    }
}

fn row_to_rate(row: sqlx::postgres::PgRow) -> FxRate {
    FxRate {
        base: row.get("base"),
        quote: row.get("quote"),
        rate: row.get("rate"),
        as_of: row.get("as_of"),
        recorded_at: row.get("recorded_at"),
    }
}
