//! Alias (GOAT) API client
//!
//! Static bearer-token auth. Exposes catalog search (by SKU and by name) for
//! the matching service and pricing insights for quotes. Alias reports money
//! in cents; amounts are converted to major units at this boundary.

use crate::application::rate_limiter::RateLimiter;
use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::{AppError, AppResult};
use crate::model::catalog::CatalogEntry;
use crate::model::market::{MarketQuote, Provider};
use crate::transport::MarketDataProvider;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
struct AliasProduct {
    catalog_id: String,
    sku: Option<String>,
    name: String,
    brand_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogSearchResponse {
    products: Vec<AliasProduct>,
}

#[derive(Debug, Deserialize)]
struct PricingInsights {
    lowest_listing_price_cents: Option<i64>,
    highest_offer_cents: Option<i64>,
    last_sold_price_cents: Option<i64>,
    currency: Option<String>,
}

/// Alias (GOAT) partner API client
pub struct AliasClient {
    config: Arc<Config>,
    http: HttpClient,
    rate_limiter: RateLimiter,
}

impl AliasClient {
    /// Creates a new Alias client
    pub fn new(config: Arc<Config>, rate_limiter: RateLimiter) -> AppResult<Self> {
        let http = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.alias_api.timeout))
            .build()?;

        Ok(Self {
            config,
            http,
            rate_limiter,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> AppResult<T> {
        self.rate_limiter.wait().await;

        let url = format!(
            "{}/{}",
            self.config.alias_api.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(query)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.alias.api_token),
            )
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        match status {
            s if s.is_success() => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED => {
                error!("Alias API rejected credentials");
                Err(AppError::Unauthorized)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimitExceeded),
            other => {
                let text = response.text().await.unwrap_or_default();
                error!("Alias request failed with status {}: {}", other, text);
                Err(AppError::Unexpected(other))
            }
        }
    }

    /// Searches the Alias catalog by SKU
    pub async fn search_by_sku(&self, sku: &str) -> AppResult<Vec<CatalogEntry>> {
        let response: CatalogSearchResponse =
            self.get("catalog/search", &[("sku", sku)]).await?;
        Ok(response.products.into_iter().map(into_entry).collect())
    }

    /// Searches the Alias catalog by product name
    pub async fn search_by_name(&self, name: &str) -> AppResult<Vec<CatalogEntry>> {
        let response: CatalogSearchResponse =
            self.get("catalog/search", &[("query", name)]).await?;
        Ok(response.products.into_iter().map(into_entry).collect())
    }

    /// Fetches pricing insights for a catalog entry
    pub async fn get_pricing(&self, catalog_id: &str) -> AppResult<Option<MarketQuote>> {
        let insights: PricingInsights = self
            .get("pricing_insights", &[("catalog_id", catalog_id)])
            .await?;

        if insights.lowest_listing_price_cents.is_none()
            && insights.highest_offer_cents.is_none()
        {
            return Ok(None);
        }

        Ok(Some(MarketQuote {
            provider: Provider::Alias,
            sku: catalog_id.to_string(),
            lowest_ask: insights.lowest_listing_price_cents.map(cents_to_major),
            highest_bid: insights.highest_offer_cents.map(cents_to_major),
            last_sale: insights.last_sold_price_cents.map(cents_to_major),
            currency: insights
                .currency
                .unwrap_or_else(|| self.config.base_currency.clone()),
            captured_at: Utc::now(),
        }))
    }
}

#[async_trait]
impl MarketDataProvider for AliasClient {
    fn provider(&self) -> Provider {
        Provider::Alias
    }

    async fn fetch_quote(&self, sku: &str) -> AppResult<Option<MarketQuote>> {
        let entries = self.search_by_sku(sku).await?;

        let Some(entry) = entries.first() else {
            debug!("No Alias catalog entry for {}", sku);
            return Ok(None);
        };

        let quote = self.get_pricing(&entry.catalog_id).await?;
        Ok(quote.map(|mut q| {
            q.sku = sku.to_string();
            q
        }))
    }
}

fn into_entry(p: AliasProduct) -> CatalogEntry {
    CatalogEntry {
        catalog_id: p.catalog_id,
        sku: p.sku.unwrap_or_default(),
        name: p.name,
        brand: p.brand_name,
    }
}

fn cents_to_major(cents: i64) -> f64 {
    cents as f64 / 100.0
}
