//! Shopify Admin API client and webhook signature verification
//!
//! The client pulls orders for sales reconciliation. Webhook payloads are
//! authenticated with the HMAC-SHA256 scheme Shopify documents: the
//! `X-Shopify-Hmac-Sha256` header carries a base64 digest of the raw request
//! body keyed on the app's shared secret. Verification is timing-safe and
//! fails closed on malformed input.

use crate::application::rate_limiter::RateLimiter;
use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::{AppError, AppResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

type HmacSha256 = Hmac<Sha256>;

const ADMIN_API_VERSION: &str = "2024-01";

/// A line item on a Shopify order
#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyLineItem {
    /// Product title
    pub title: String,
    /// Variant SKU as configured in the store
    pub sku: Option<String>,
    /// Quantity sold
    pub quantity: i64,
    /// Unit price as a decimal string
    pub price: String,
}

/// A Shopify order
#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyOrder {
    /// Order identifier
    pub id: i64,
    /// Human-facing order name (e.g. "#1001")
    pub name: String,
    /// Order total as a decimal string
    pub total_price: String,
    /// Order currency (ISO 4217)
    pub currency: String,
    /// When the order was created
    pub created_at: DateTime<Utc>,
    /// Line items
    pub line_items: Vec<ShopifyLineItem>,
}

#[derive(Debug, Deserialize)]
struct OrdersResponse {
    orders: Vec<ShopifyOrder>,
}

/// Shopify Admin API client
pub struct ShopifyClient {
    config: Arc<Config>,
    http: HttpClient,
    rate_limiter: RateLimiter,
}

impl ShopifyClient {
    /// Creates a new Shopify client
    pub fn new(config: Arc<Config>, rate_limiter: RateLimiter) -> AppResult<Self> {
        let http = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            config,
            http,
            rate_limiter,
        })
    }

    // Shop domains normally arrive bare ("my-store.myshopify.com"); a full
    // URL is taken as-is so tests can point at a local server.
    fn admin_url(&self, resource: &str) -> String {
        let domain = &self.config.shopify.shop_domain;
        let root = if domain.contains("://") {
            domain.trim_end_matches('/').to_string()
        } else {
            format!("https://{domain}")
        };
        format!("{root}/admin/api/{ADMIN_API_VERSION}/{resource}")
    }

    /// Lists orders created since the given time, one page of
    /// `sync.page_size` at most
    ///
    /// # Arguments
    /// * `created_at_min` - Only orders created at or after this instant
    pub async fn list_orders(&self, created_at_min: DateTime<Utc>) -> AppResult<Vec<ShopifyOrder>> {
        self.rate_limiter.wait().await;

        let url = self.admin_url("orders.json");
        let min = created_at_min.to_rfc3339();
        let limit = self.config.sync.page_size.to_string();

        debug!("GET {} (created_at_min={})", url, min);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("status", "any"),
                ("created_at_min", min.as_str()),
                ("limit", limit.as_str()),
            ])
            .header("X-Shopify-Access-Token", &self.config.shopify.access_token)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        match status {
            s if s.is_success() => {
                let body: OrdersResponse = response.json().await?;
                Ok(body.orders)
            }
            StatusCode::UNAUTHORIZED => {
                error!("Shopify API rejected the access token");
                Err(AppError::Unauthorized)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimitExceeded),
            other => {
                let text = response.text().await.unwrap_or_default();
                error!("Shopify request failed with status {}: {}", other, text);
                Err(AppError::Unexpected(other))
            }
        }
    }

    /// Lists orders from the configured lookback window
    ///
    /// Cursor is `sync.days_to_look_back` days before now.
    pub async fn list_recent_orders(&self) -> AppResult<Vec<ShopifyOrder>> {
        let since = Utc::now() - chrono::Duration::days(self.config.sync.days_to_look_back);
        self.list_orders(since).await
    }

    /// Verifies a webhook payload against the configured shared secret
    ///
    /// See [`verify_webhook_signature`].
    pub fn verify_webhook(&self, body: &[u8], signature_header: &str) -> AppResult<()> {
        verify_webhook_signature(&self.config.shopify.webhook_secret, body, signature_header)
    }
}

/// Verifies a Shopify webhook HMAC signature
///
/// # Arguments
/// * `secret` - The app's shared webhook secret
/// * `body` - Raw request body bytes, exactly as received
/// * `signature_header` - Value of the `X-Shopify-Hmac-Sha256` header
///   (base64-encoded HMAC-SHA256 digest)
///
/// # Returns
/// * `Ok(())` when the signature matches
/// * `Err(AppError::InvalidWebhookSignature)` on mismatch or any malformed
///   input (empty secret, undecodable header) - verification fails closed
pub fn verify_webhook_signature(
    secret: &str,
    body: &[u8],
    signature_header: &str,
) -> AppResult<()> {
    if secret.is_empty() || signature_header.is_empty() {
        warn!("Webhook verification attempted with empty secret or signature");
        return Err(AppError::InvalidWebhookSignature);
    }

    let expected = match BASE64.decode(signature_header.trim()) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!("Webhook signature header is not valid base64");
            return Err(AppError::InvalidWebhookSignature);
        }
    };

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return Err(AppError::InvalidWebhookSignature),
    };
    mac.update(body);

    // verify_slice performs a constant-time comparison
    mac.verify_slice(&expected)
        .map_err(|_| AppError::InvalidWebhookSignature)
}

/// Computes the base64 HMAC-SHA256 signature Shopify would send for a body
///
/// Used when registering webhooks through a proxy and in tests.
#[must_use]
pub fn sign_webhook_body(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(body);
    BASE64.encode(mac.finalize().into_bytes())
}
