//! Error types for the resale-desk library
//!
//! A single crate-wide [`AppError`] covers transport, persistence and
//! reconciliation failures. Provider clients map HTTP status codes onto the
//! relevant variants; everything else converts through the `From` impls.

use reqwest::StatusCode;
use std::fmt;

/// Convenient result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

/// Main error type for the library
#[derive(Debug)]
pub enum AppError {
    /// Credentials were rejected by a provider
    Unauthorized,
    /// The cached OAuth access token has expired and must be refreshed
    OAuthTokenExpired,
    /// A provider returned 429 and retries were exhausted
    RateLimitExceeded,
    /// A provider returned an unexpected HTTP status
    Unexpected(StatusCode),
    /// The requested entity does not exist
    NotFound(String),
    /// A webhook payload failed HMAC signature verification
    InvalidWebhookSignature,
    /// No FX rate is available for the requested currency pair
    FxRateUnavailable { base: String, quote: String },
    /// Underlying HTTP transport failure
    Network(reqwest::Error),
    /// JSON (de)serialization failure
    Serialization(serde_json::Error),
    /// Database failure
    Database(sqlx::Error),
    /// Invalid or missing configuration value
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized => write!(f, "unauthorized: credentials rejected"),
            AppError::OAuthTokenExpired => write!(f, "OAuth access token expired"),
            AppError::RateLimitExceeded => write!(f, "rate limit exceeded, retries exhausted"),
            AppError::Unexpected(status) => write!(f, "unexpected HTTP status: {status}"),
            AppError::NotFound(what) => write!(f, "not found: {what}"),
            AppError::InvalidWebhookSignature => write!(f, "webhook signature verification failed"),
            AppError::FxRateUnavailable { base, quote } => {
                write!(f, "no FX rate available for {base}/{quote}")
            }
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Serialization(e) => write!(f, "serialization error: {e}"),
            AppError::Database(e) => write!(f, "database error: {e}"),
            AppError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Network(e) => Some(e),
            AppError::Serialization(e) => Some(e),
            AppError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Database(e)
    }
}
