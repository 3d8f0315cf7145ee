//! StockX API client
//!
//! Handles the OAuth refresh-token grant with the access token cached behind
//! a `RwLock`, transparent refresh on expiry or 401, and bounded
//! retry-with-exponential-backoff (plus jitter) on 429/5xx responses. A
//! `Retry-After` header, when present, overrides the computed backoff.

use crate::application::rate_limiter::RateLimiter;
use crate::config::Config;
use crate::constants::{TOKEN_REFRESH_MARGIN_SECS, USER_AGENT};
use crate::error::{AppError, AppResult};
use crate::model::market::{MarketQuote, Provider};
use crate::model::retry::RetryConfig;
use crate::transport::MarketDataProvider;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Cached OAuth access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthToken {
    /// Access token for API requests
    pub access_token: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
    /// Token type (usually "Bearer")
    pub token_type: String,
    /// Timestamp when the token was obtained (seconds since epoch)
    #[serde(skip)]
    pub created_at: i64,
}

impl OAuthToken {
    /// Checks if the token is expired or will expire within the margin
    ///
    /// # Arguments
    /// * `margin_seconds` - Safety margin in seconds (default: 300 = 5 minutes)
    #[must_use]
    pub fn is_expired(&self, margin_seconds: Option<i64>) -> bool {
        let margin = margin_seconds.unwrap_or(TOKEN_REFRESH_MARGIN_SECS);
        let now = Utc::now().timestamp();
        let expires_at = self.created_at + self.expires_in as i64;
        now >= (expires_at - margin)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
    token_type: String,
}

/// A product returned by the StockX catalog search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockxProduct {
    /// StockX product identifier
    pub product_id: String,
    /// Manufacturer style code
    pub style_id: Option<String>,
    /// Product title
    pub title: String,
    /// Brand name
    pub brand: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    products: Vec<StockxProduct>,
}

/// Market data for a StockX product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockxMarketData {
    /// Cheapest active ask
    pub lowest_ask_amount: Option<f64>,
    /// Highest active bid
    pub highest_bid_amount: Option<f64>,
    /// Currency the amounts are denominated in
    pub currency_code: Option<String>,
}

/// StockX API client with automatic token management
///
/// Token handling:
/// - the access token is cached per client instance (one instance per
///   connected account) and shared across calls behind a `RwLock`
/// - refresh happens ahead of expiry (5 minute margin) and once more on an
///   unexpected 401
pub struct StockxClient {
    config: Arc<Config>,
    http: HttpClient,
    token: Arc<RwLock<Option<OAuthToken>>>,
    rate_limiter: RateLimiter,
    retry: RetryConfig,
}

impl StockxClient {
    /// Creates a new StockX client
    ///
    /// No network call is made here; the first request triggers the token
    /// grant.
    pub fn new(config: Arc<Config>, rate_limiter: RateLimiter) -> AppResult<Self> {
        let http = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.stockx_api.timeout))
            .build()?;

        Ok(Self {
            config,
            http,
            token: Arc::new(RwLock::new(None)),
            rate_limiter,
            retry: RetryConfig::new(),
        })
    }

    /// Overrides the retry configuration
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Returns a valid access token, refreshing it when needed
    async fn get_token(&self) -> AppResult<OAuthToken> {
        {
            let token = self.token.read().await;
            if let Some(t) = token.as_ref() {
                if !t.is_expired(None) {
                    return Ok(t.clone());
                }
            }
        }

        info!("StockX access token missing or near expiry, refreshing");
        self.refresh_access_token().await
    }

    /// Exchanges the refresh token for a new access token
    pub async fn refresh_access_token(&self) -> AppResult<OAuthToken> {
        let url = format!(
            "{}/oauth/token",
            self.config.stockx_api.auth_url.trim_end_matches('/')
        );

        let body = serde_json::json!({
            "grant_type": "refresh_token",
            "client_id": self.config.stockx.client_id,
            "client_secret": self.config.stockx.client_secret,
            "refresh_token": self.config.stockx.refresh_token,
            "audience": "gateway.stockx.com",
        });

        debug!("Requesting StockX access token from {}", url);

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            error!("StockX token grant failed with status {}: {}", status, text);
            return Err(AppError::Unauthorized);
        }

        let json: TokenResponse = response.json().await?;

        let token = OAuthToken {
            access_token: json.access_token,
            expires_in: json.expires_in,
            token_type: json.token_type,
            created_at: Utc::now().timestamp(),
        };

        let mut cached = self.token.write().await;
        *cached = Some(token.clone());

        info!("StockX access token refreshed");
        Ok(token)
    }

    /// Makes an authenticated request with retry on 429/5xx
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!(
            "{}/{}",
            self.config.stockx_api.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        let mut attempt: u32 = 0;
        let mut refreshed_on_401 = false;

        loop {
            self.rate_limiter.wait().await;

            let token = self.get_token().await?;

            debug!("{} {} (attempt {})", method, url, attempt + 1);

            let response = self
                .http
                .request(method.clone(), &url)
                .query(query)
                .header("Authorization", format!("Bearer {}", token.access_token))
                .header("x-api-key", &self.config.stockx.api_key)
                .header("Accept", "application/json")
                .send()
                .await?;

            let status = response.status();

            if status.is_success() {
                return Ok(response.json().await?);
            }

            if status == StatusCode::UNAUTHORIZED {
                if refreshed_on_401 {
                    error!("StockX request unauthorized after token refresh");
                    return Err(AppError::Unauthorized);
                }
                warn!("StockX returned 401, refreshing token and retrying once");
                self.refresh_access_token().await?;
                refreshed_on_401 = true;
                continue;
            }

            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                if attempt >= self.retry.max_retries() {
                    warn!(
                        "StockX request still failing with {} after {} retries",
                        status, attempt
                    );
                    return if status == StatusCode::TOO_MANY_REQUESTS {
                        Err(AppError::RateLimitExceeded)
                    } else {
                        Err(AppError::Unexpected(status))
                    };
                }

                let delay_ms = retry_after_ms(&response)
                    .unwrap_or_else(|| self.retry.delay_for_attempt(attempt) + jitter_ms());
                warn!(
                    "StockX returned {}, backing off {}ms before retry {}",
                    status,
                    delay_ms,
                    attempt + 1
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                attempt += 1;
                continue;
            }

            let text = response.text().await.unwrap_or_default();
            error!("StockX request failed with status {}: {}", status, text);
            return Err(AppError::Unexpected(status));
        }
    }

    /// Searches the StockX catalog by style code or free text
    pub async fn search_catalog(&self, query: &str) -> AppResult<Vec<StockxProduct>> {
        let response: SearchResponse = self
            .request(Method::GET, "catalog/search", &[("query", query)])
            .await?;
        Ok(response.products)
    }

    /// Fetches market data (lowest ask / highest bid) for a product
    pub async fn get_market_data(
        &self,
        product_id: &str,
        currency: &str,
    ) -> AppResult<StockxMarketData> {
        let path = format!("catalog/products/{product_id}/market-data");
        self.request(Method::GET, &path, &[("currencyCode", currency)])
            .await
    }
}

#[async_trait]
impl MarketDataProvider for StockxClient {
    fn provider(&self) -> Provider {
        Provider::Stockx
    }

    async fn fetch_quote(&self, sku: &str) -> AppResult<Option<MarketQuote>> {
        let products = self.search_catalog(sku).await?;

        // Prefer an exact style-code match over search ranking.
        let product = products
            .iter()
            .find(|p| {
                p.style_id
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(sku))
            })
            .or_else(|| products.first());

        let Some(product) = product else {
            debug!("No StockX catalog entry for {}", sku);
            return Ok(None);
        };

        let market = self
            .get_market_data(&product.product_id, &self.config.base_currency)
            .await?;

        Ok(Some(MarketQuote {
            provider: Provider::Stockx,
            sku: sku.to_string(),
            lowest_ask: market.lowest_ask_amount,
            highest_bid: market.highest_bid_amount,
            last_sale: None,
            currency: market
                .currency_code
                .unwrap_or_else(|| self.config.base_currency.clone()),
            captured_at: Utc::now(),
        }))
    }
}

/// Reads a `Retry-After` header as milliseconds, if present and sane
fn retry_after_ms(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(|secs| secs.min(60) * 1000)
}

/// Random 0-250ms jitter added to backoff delays
fn jitter_ms() -> u64 {
    rand::rng().random_range(0..250)
}
