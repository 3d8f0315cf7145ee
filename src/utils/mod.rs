//! Shared utilities: environment parsing, logging setup, finance math and
//! SKU string processing.

/// Environment variable helpers
pub mod config;
/// Financial calculation utilities
pub mod finance;
/// Logger initialization
pub mod logger;
/// SKU normalization and string similarity
pub mod sku;
