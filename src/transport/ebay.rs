//! eBay API client
//!
//! Client-credentials grant (Basic auth against the identity endpoint) with
//! the application token cached behind a `RwLock`. Quotes come from the
//! Browse API: the cheapest active listing for a style code stands in for the
//! lowest ask; eBay has no bid book.

use crate::application::rate_limiter::RateLimiter;
use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::{AppError, AppResult};
use crate::model::market::{MarketQuote, Provider};
use crate::transport::MarketDataProvider;
use crate::transport::stockx::OAuthToken;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

const BROWSE_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";
/// Sneakers category in the eBay taxonomy; keeps searches from matching
/// t-shirts and posters with the style code in the listing title
const SNEAKERS_CATEGORY_ID: &str = "15709";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
    token_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemPrice {
    value: String,
    currency: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemSummary {
    title: String,
    price: Option<ItemPrice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    item_summaries: Option<Vec<ItemSummary>>,
}

/// eBay Browse API client
pub struct EbayClient {
    config: Arc<Config>,
    http: HttpClient,
    token: Arc<RwLock<Option<OAuthToken>>>,
    rate_limiter: RateLimiter,
}

impl EbayClient {
    /// Creates a new eBay client
    pub fn new(config: Arc<Config>, rate_limiter: RateLimiter) -> AppResult<Self> {
        let http = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.ebay_api.timeout))
            .build()?;

        Ok(Self {
            config,
            http,
            token: Arc::new(RwLock::new(None)),
            rate_limiter,
        })
    }

    /// Returns a valid application token, requesting one when needed
    async fn get_token(&self) -> AppResult<OAuthToken> {
        {
            let token = self.token.read().await;
            if let Some(t) = token.as_ref() {
                if !t.is_expired(None) {
                    return Ok(t.clone());
                }
            }
        }

        info!("eBay application token missing or near expiry, requesting");
        self.request_token().await
    }

    async fn request_token(&self) -> AppResult<OAuthToken> {
        let url = format!(
            "{}/token",
            self.config.ebay_api.auth_url.trim_end_matches('/')
        );

        let basic = BASE64.encode(format!(
            "{}:{}",
            self.config.ebay.client_id, self.config.ebay.client_secret
        ));

        debug!("Requesting eBay application token from {}", url);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Basic {basic}"))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", BROWSE_SCOPE),
            ])
            .send()
            .await?;

        let status = response.status();

        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            error!("eBay token grant failed with status {}: {}", status, text);
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

        info!("eBay application token obtained");
        Ok(token)
    }

    /// Searches active listings for a style code, cheapest first
    async fn search_listings(&self, query: &str) -> AppResult<Vec<ItemSummary>> {
        self.rate_limiter.wait().await;

        let token = self.get_token().await?;

        let url = format!(
            "{}/buy/browse/v1/item_summary/search",
            self.config.ebay_api.base_url.trim_end_matches('/')
        );

        debug!("GET {} (q={})", url, query);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("category_ids", SNEAKERS_CATEGORY_ID),
                ("sort", "price"),
                ("limit", "10"),
            ])
            .header("Authorization", format!("Bearer {}", token.access_token))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        match status {
            s if s.is_success() => {
                let body: SearchResponse = response.json().await?;
                Ok(body.item_summaries.unwrap_or_default())
            }
            StatusCode::UNAUTHORIZED => Err(AppError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimitExceeded),
            other => {
                let text = response.text().await.unwrap_or_default();
                error!("eBay request failed with status {}: {}", other, text);
                Err(AppError::Unexpected(other))
            }
        }
    }
}

#[async_trait]
impl MarketDataProvider for EbayClient {
    fn provider(&self) -> Provider {
        Provider::Ebay
    }

    async fn fetch_quote(&self, sku: &str) -> AppResult<Option<MarketQuote>> {
        let listings = self.search_listings(sku).await?;

        let cheapest = listings
            .iter()
            .filter_map(|item| {
                let price = item.price.as_ref()?;
                let value = price.value.parse::<f64>().ok()?;
                Some((item, price, value))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2));

        let Some((item, price, value)) = cheapest else {
            debug!("No priced eBay listings for {}", sku);
            return Ok(None);
        };

        debug!("Cheapest eBay listing for {}: {} ({})", sku, value, item.title);

        Ok(Some(MarketQuote {
            provider: Provider::Ebay,
            sku: sku.to_string(),
            lowest_ask: Some(value),
            highest_bid: None,
            last_sale: None,
            currency: price.currency.clone(),
            captured_at: Utc::now(),
        }))
    }
}
