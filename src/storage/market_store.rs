//! Per-provider market snapshots and catalog mappings

use crate::model::catalog::{CatalogMatch, MatchMethod};
use crate::model::market::{MarketQuote, Provider};
use sqlx::{PgPool, Row};
use tracing::debug;

/// Creates the market snapshot and catalog mapping tables
pub async fn initialize_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS market_snapshots (
            id BIGSERIAL PRIMARY KEY,
            provider VARCHAR(16) NOT NULL,
            sku VARCHAR(255) NOT NULL,
            lowest_ask DOUBLE PRECISION,
            highest_bid DOUBLE PRECISION,
            last_sale DOUBLE PRECISION,
            currency VARCHAR(3) NOT NULL,
            captured_at TIMESTAMPTZ NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE(provider, sku, captured_at)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS catalog_mappings (
            inventory_id VARCHAR(64) PRIMARY KEY,
            catalog_id VARCHAR(255) NOT NULL,
            method VARCHAR(32) NOT NULL,
            confidence DOUBLE PRECISION NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_market_snapshots_sku_time ON market_snapshots(sku, captured_at DESC)",
        "CREATE INDEX IF NOT EXISTS idx_market_snapshots_provider ON market_snapshots(provider)",
    ];

    for index_sql in indexes {
        sqlx::query(index_sql).execute(pool).await?;
    }

    Ok(())
}

/// Store for market snapshots and catalog mappings
pub struct MarketStore {
    pool: PgPool,
}

impl MarketStore {
    /// Creates a new market store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records a provider quote; idempotent on (provider, sku, captured_at)
    pub async fn upsert_snapshot(&self, quote: &MarketQuote) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO market_snapshots
                (provider, sku, lowest_ask, highest_bid, last_sale, currency, captured_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (provider, sku, captured_at) DO UPDATE SET
                lowest_ask = EXCLUDED.lowest_ask,
                highest_bid = EXCLUDED.highest_bid,
                last_sale = EXCLUDED.last_sale,
                currency = EXCLUDED.currency
            "#,
        )
        .bind(quote.provider.as_str())
        .bind(&quote.sku)
        .bind(quote.lowest_ask)
        .bind(quote.highest_bid)
        .bind(quote.last_sale)
        .bind(&quote.currency)
        .bind(quote.captured_at)
        .execute(&self.pool)
        .await?;

        debug!("Stored {} snapshot for {}", quote.provider, quote.sku);
        Ok(())
    }

    /// Returns the most recent snapshot per provider for a SKU
    pub async fn latest_quotes(&self, sku: &str) -> Result<Vec<MarketQuote>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT ON (provider)
                provider, sku, lowest_ask, highest_bid, last_sale, currency, captured_at
            FROM market_snapshots
            WHERE sku = $1
            ORDER BY provider, captured_at DESC
            "#,
        )
        .bind(sku)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let provider: String = row.get("provider");
                let provider = Provider::from_str_opt(&provider)?;
                Some(MarketQuote {
                    provider,
                    sku: row.get("sku"),
                    lowest_ask: row.get("lowest_ask"),
                    highest_bid: row.get("highest_bid"),
                    last_sale: row.get("last_sale"),
                    currency: row.get("currency"),
                    captured_at: row.get("captured_at"),
                })
            })
            .collect())
    }

    /// Saves a catalog mapping for an inventory item
    pub async fn save_mapping(
        &self,
        inventory_id: &str,
        mapping: &CatalogMatch,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO catalog_mappings (inventory_id, catalog_id, method, confidence)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (inventory_id) DO UPDATE SET
                catalog_id = EXCLUDED.catalog_id,
                method = EXCLUDED.method,
                confidence = EXCLUDED.confidence,
                updated_at = NOW()
            "#,
        )
        .bind(inventory_id)
        .bind(&mapping.catalog_id)
        .bind(mapping.method.to_string())
        .bind(mapping.confidence)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetches the saved catalog mapping for an inventory item
    pub async fn get_mapping(
        &self,
        inventory_id: &str,
    ) -> Result<Option<CatalogMatch>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT catalog_id, method, confidence FROM catalog_mappings WHERE inventory_id = $1",
        )
        .bind(inventory_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            let method: String = row.get("method");
            CatalogMatch {
                catalog_id: row.get("catalog_id"),
                method: match method.as_str() {
                    "exact_sku" => MatchMethod::ExactSku,
                    "normalized_sku" => MatchMethod::NormalizedSku,
                    "fuzzy_sku" => MatchMethod::FuzzySku,
                    _ => MatchMethod::FuzzyName,
                },
                confidence: row.get("confidence"),
            }
        }))
    }
}
