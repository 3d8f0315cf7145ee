//! PostgreSQL persistence
//!
//! Plain sqlx queries: `CREATE TABLE IF NOT EXISTS` initialization and
//! `ON CONFLICT` upserts. Coordination between concurrent invocations is
//! delegated to the database's own transaction guarantees; the application
//! keeps no locking of its own.

/// Database configuration
pub mod config;
/// FX rate snapshots
pub mod fx_store;
/// Inventory and sales rows
pub mod inventory_store;
/// Per-provider market snapshots and catalog mappings
pub mod market_store;
/// Sync queue rows
pub mod sync_store;
/// Pool helpers
pub mod utils;

use sqlx::PgPool;
use tracing::info;

/// Initializes every table this crate owns
pub async fn initialize_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Initializing resale-desk database tables...");

    inventory_store::initialize_tables(pool).await?;
    market_store::initialize_tables(pool).await?;
    fx_store::initialize_tables(pool).await?;
    sync_store::initialize_tables(pool).await?;

    info!("Database tables initialized successfully");
    Ok(())
}
