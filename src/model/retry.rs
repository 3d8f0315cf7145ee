use crate::constants::{BACKOFF_BASE_DELAY_MS, BACKOFF_MAX_DELAY_MS};
use crate::utils::config::get_env_or_none;

/// Configuration for HTTP request retry behavior
///
/// Applies to 429 and 5xx responses from provider APIs. Delays grow
/// exponentially from `base_delay_ms` and are capped at `max_delay_ms`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries (None = use default 3)
    pub max_retry_count: Option<u32>,
    /// Base backoff delay in milliseconds (None = use default)
    pub base_delay_ms: Option<u64>,
    /// Maximum backoff delay in milliseconds (None = use default)
    pub max_delay_ms: Option<u64>,
}

impl RetryConfig {
    /// Creates a retry configuration from environment variables or defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a retry configuration with a maximum number of retries
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retry_count: Some(max_retries),
            base_delay_ms: None,
            max_delay_ms: None,
        }
    }

    /// Creates a retry configuration with both max retries and base delay
    #[must_use]
    pub fn with_max_retries_and_delay(max_retries: u32, base_delay_ms: u64) -> Self {
        Self {
            max_retry_count: Some(max_retries),
            base_delay_ms: Some(base_delay_ms),
            max_delay_ms: None,
        }
    }

    /// Gets the maximum retry count (default: 3)
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retry_count.unwrap_or(3)
    }

    /// Gets the base backoff delay in milliseconds
    #[must_use]
    pub fn base_delay_ms(&self) -> u64 {
        self.base_delay_ms.unwrap_or(BACKOFF_BASE_DELAY_MS)
    }

    /// Gets the maximum backoff delay in milliseconds
    #[must_use]
    pub fn max_delay_ms(&self) -> u64 {
        self.max_delay_ms.unwrap_or(BACKOFF_MAX_DELAY_MS)
    }

    /// Computes the backoff delay for a given attempt (0-based), capped
    ///
    /// Callers add jitter on top; this returns the deterministic part.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> u64 {
        let exp = self.base_delay_ms().saturating_mul(1u64 << attempt.min(16));
        exp.min(self.max_delay_ms())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        let max_retry_count: Option<u32> = get_env_or_none("MAX_RETRY_COUNT");
        let base_delay_ms: Option<u64> = get_env_or_none("RETRY_BASE_DELAY_MS");
        let max_delay_ms: Option<u64> = get_env_or_none("RETRY_MAX_DELAY_MS");

        Self {
            max_retry_count,
            base_delay_ms,
            max_delay_ms,
        }
    }
}
