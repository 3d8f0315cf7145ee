use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketplace data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// StockX marketplace
    Stockx,
    /// Alias (GOAT) marketplace
    Alias,
    /// Shopify storefront
    Shopify,
    /// eBay marketplace
    Ebay,
}

impl Provider {
    /// Storage representation of the provider
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stockx => "stockx",
            Self::Alias => "alias",
            Self::Shopify => "shopify",
            Self::Ebay => "ebay",
        }
    }

    /// Parses a provider from its storage representation
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "stockx" => Some(Self::Stockx),
            "alias" => Some(Self::Alias),
            "shopify" => Some(Self::Shopify),
            "ebay" => Some(Self::Ebay),
            _ => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single provider's view of the order book for one product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Provider this quote came from
    pub provider: Provider,
    /// Canonical SKU the quote is keyed on
    pub sku: String,
    /// Cheapest active sell listing, if any
    pub lowest_ask: Option<f64>,
    /// Highest active buy offer, if any
    pub highest_bid: Option<f64>,
    /// Most recent sale price, if the provider exposes it
    pub last_sale: Option<f64>,
    /// Quote currency (ISO 4217)
    pub currency: String,
    /// When the quote was captured
    pub captured_at: DateTime<Utc>,
}

/// Confidence flag on an aggregated price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceConfidence {
    /// Priority provider quote, or consensus with tight spread
    High,
    /// Consensus across providers with spread above the variance threshold
    Low,
}

/// Where an aggregated price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    /// Taken directly from the category's priority provider
    Priority(Provider),
    /// Median across all quoting providers
    Consensus,
}

/// Cross-provider reconciled price for one product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedPrice {
    /// Reconciled market value (lowest-ask basis)
    pub value: f64,
    /// Best available highest bid across providers
    pub highest_bid: Option<f64>,
    /// Currency of `value` (ISO 4217)
    pub currency: String,
    /// How the value was derived
    pub basis: PriceBasis,
    /// Confidence flag
    pub confidence: PriceConfidence,
    /// Number of provider quotes that carried an ask
    pub sample_size: usize,
    /// When the aggregation was computed
    pub computed_at: DateTime<Utc>,
}
