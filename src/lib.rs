//! # resale-desk
//!
//! Client library for sneaker/streetwear resale operations: it talks to the
//! marketplace APIs (StockX, Alias/GOAT, Shopify, eBay), reconciles their
//! pricing data into a single market value per product, matches messy
//! inventory SKUs to provider catalogs, snapshots FX rates at transaction
//! time, and produces inventory valuation and profit/loss reports on top of
//! a PostgreSQL store.
//!
//! ## Quick start
//! ```ignore
//! use resale_desk::prelude::*;
//!
//! let config = Arc::new(Config::new());
//! let limiter = RateLimiter::new(&config.rate_limiter);
//! let stockx = StockxClient::new(config.clone(), limiter.clone())?;
//!
//! let quote = stockx.fetch_quote("DD1391-100").await?;
//! ```
//!
//! The reconciliation core ([`application::services::pricing`],
//! [`application::services::matching`], [`utils::sku`]) is pure and usable
//! without any API credentials or database.

/// Application layer: rate limiting, reconciliation and reporting services
pub mod application;
/// Environment-driven configuration
pub mod config;
/// Global constants
pub mod constants;
/// Error types
pub mod error;
/// Domain models
pub mod model;
/// Commonly used types and traits
pub mod prelude;
/// PostgreSQL persistence
pub mod storage;
/// Provider HTTP clients
pub mod transport;
/// Shared utilities
pub mod utils;

/// Library version, taken from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
