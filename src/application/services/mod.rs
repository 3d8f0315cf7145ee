//! Reconciliation, sync and reporting services
//!
//! The pricing and matching modules are pure functions over provider data;
//! the fx, sync and valuation services orchestrate them against the provider
//! clients and the Postgres stores.

/// FX rate fetching and snapshotting
pub mod fx;
/// Inventory-to-catalog matching heuristics
pub mod matching;
/// Cross-provider price aggregation
pub mod pricing;
/// Batch market-data sync
pub mod sync;
/// Inventory valuation and P/L reporting
pub mod valuation;

pub use fx::FxService;
pub use matching::{MatchingService, match_inventory_to_alias_catalog};
pub use pricing::{aggregate_prices, priority_provider};
pub use sync::SyncService;
pub use valuation::ValuationService;
