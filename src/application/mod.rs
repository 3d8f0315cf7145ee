//! Application layer: rate limiting and the reconciliation/sync services

/// Shared rate limiter for provider clients
pub mod rate_limiter;
/// Reconciliation, sync and reporting services
pub mod services;
