//! Provider HTTP clients
//!
//! One client per marketplace. The pricing providers (StockX, Alias, eBay)
//! all implement [`MarketDataProvider`] so the sync service can iterate them
//! uniformly; Shopify is a sales source and webhook surface, not a pricing
//! provider.

use crate::error::AppResult;
use crate::model::market::{MarketQuote, Provider};
use async_trait::async_trait;

/// Alias (GOAT) API client
pub mod alias;
/// eBay API client
pub mod ebay;
/// Shopify Admin API client and webhook verification
pub mod shopify;
/// StockX API client
pub mod stockx;

/// A marketplace that can quote current market prices for a product
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Which provider this client talks to
    fn provider(&self) -> Provider;

    /// Fetches the current order-book quote for a canonical SKU
    ///
    /// Returns `Ok(None)` when the provider has no listing for the SKU;
    /// errors are reserved for transport/auth failures.
    async fn fetch_quote(&self, sku: &str) -> AppResult<Option<MarketQuote>>;
}
