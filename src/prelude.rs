//! # Resale Desk Prelude
//!
//! Convenient single import for the most commonly used types and traits.
//!
//! ## Usage
//!
//! ```rust
//! use resale_desk::prelude::*;
//!
//! let config = Config::new();
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Main configuration
pub use crate::config::Config;

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type and result alias
pub use crate::error::{AppError, AppResult};

// ============================================================================
// PROVIDER CLIENTS
// ============================================================================

/// Pricing provider trait
pub use crate::transport::MarketDataProvider;

/// Alias (GOAT) client
pub use crate::transport::alias::AliasClient;

/// eBay client
pub use crate::transport::ebay::EbayClient;

/// Shopify client and webhook verification
pub use crate::transport::shopify::{ShopifyClient, verify_webhook_signature};

/// StockX client
pub use crate::transport::stockx::StockxClient;

// ============================================================================
// SERVICES
// ============================================================================

/// FX snapshotting
pub use crate::application::services::FxService;

/// Catalog matching
pub use crate::application::services::{MatchingService, match_inventory_to_alias_catalog};

/// Price aggregation
pub use crate::application::services::{aggregate_prices, priority_provider};

/// Batch sync
pub use crate::application::services::SyncService;

/// Valuation and P/L reporting
pub use crate::application::services::ValuationService;

// ============================================================================
// MODELS
// ============================================================================

/// Catalog models
pub use crate::model::catalog::{CatalogEntry, CatalogMatch, MatchMethod};

/// FX models
pub use crate::model::fx::FxRate;

/// Inventory models
pub use crate::model::inventory::{InventoryItem, InventoryStatus, ProductCategory, Sale};

/// Market models
pub use crate::model::market::{
    AggregatedPrice, MarketQuote, PriceBasis, PriceConfidence, Provider,
};

/// Retry configuration
pub use crate::model::retry::RetryConfig;

/// Sync models
pub use crate::model::sync::{SyncJob, SyncStatus};

// ============================================================================
// UTILITIES
// ============================================================================

/// Rate limiting
pub use crate::application::rate_limiter::RateLimiter;

/// Logging setup
pub use crate::utils::logger::setup_logger;

/// Financial calculation utilities
pub use crate::utils::finance::{calculate_percentage_return, calculate_pnl};

/// SKU normalization
pub use crate::utils::sku::normalize_sku_for_matching;

// ============================================================================
// STORAGE
// ============================================================================

/// Database configuration
pub use crate::storage::config::DatabaseConfig;

/// Stores
pub use crate::storage::fx_store::FxStore;
pub use crate::storage::inventory_store::InventoryStore;
pub use crate::storage::market_store::MarketStore;
pub use crate::storage::sync_store::SyncStore;

/// Database initialization and pool helpers
pub use crate::storage::initialize_database;
pub use crate::storage::utils::{create_connection_pool, create_database_config_from_env};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use chrono::{DateTime, NaiveDate, Utc};
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tracing::{debug, error, info, warn};
