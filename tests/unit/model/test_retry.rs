use resale_desk::constants::{BACKOFF_BASE_DELAY_MS, BACKOFF_MAX_DELAY_MS};
use resale_desk::model::retry::RetryConfig;

#[test]
fn with_max_retries() {
    let config = RetryConfig::with_max_retries(5);
    assert_eq!(config.max_retries(), 5);
    assert_eq!(config.base_delay_ms(), BACKOFF_BASE_DELAY_MS);
}

#[test]
fn with_max_retries_and_delay() {
    let config = RetryConfig::with_max_retries_and_delay(3, 250);
    assert_eq!(config.max_retries(), 3);
    assert_eq!(config.base_delay_ms(), 250);
}

#[test]
fn delay_grows_exponentially() {
    let config = RetryConfig::with_max_retries_and_delay(5, 100);
    assert_eq!(config.delay_for_attempt(0), 100);
    assert_eq!(config.delay_for_attempt(1), 200);
    assert_eq!(config.delay_for_attempt(2), 400);
    assert_eq!(config.delay_for_attempt(3), 800);
}

#[test]
fn delay_capped_at_max() {
    let config = RetryConfig::with_max_retries_and_delay(20, 1000);
    assert_eq!(config.delay_for_attempt(19), BACKOFF_MAX_DELAY_MS);
}

#[test]
fn getters_use_defaults() {
    let config = RetryConfig {
        max_retry_count: None,
        base_delay_ms: None,
        max_delay_ms: None,
    };
    assert_eq!(config.max_retries(), 3);
    assert_eq!(config.base_delay_ms(), BACKOFF_BASE_DELAY_MS);
    assert_eq!(config.max_delay_ms(), BACKOFF_MAX_DELAY_MS);
}
