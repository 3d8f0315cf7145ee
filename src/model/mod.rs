//! Domain models shared across transport, services and storage

/// Alias catalog entries and match results
pub mod catalog;
/// FX rates and snapshots
pub mod fx;
/// Inventory items and sales
pub mod inventory;
/// Market quotes and aggregated prices
pub mod market;
/// HTTP retry configuration
pub mod retry;
/// Sync queue rows
pub mod sync;
