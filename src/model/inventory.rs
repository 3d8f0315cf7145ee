use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category of an inventory item
///
/// Drives which provider is treated as the pricing authority during
/// aggregation (StockX for sneakers, Alias for streetwear, eBay for
/// collectibles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Sneakers and other footwear
    Sneakers,
    /// Apparel and accessories
    Streetwear,
    /// Trading cards, figures and similar
    Collectibles,
    /// Anything else
    Other,
}

impl ProductCategory {
    /// Parses a category from its storage representation, defaulting to Other
    #[must_use]
    pub fn from_str_or_other(s: &str) -> Self {
        match s {
            "sneakers" => Self::Sneakers,
            "streetwear" => Self::Streetwear,
            "collectibles" => Self::Collectibles,
            _ => Self::Other,
        }
    }

    /// Storage representation of the category
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sneakers => "sneakers",
            Self::Streetwear => "streetwear",
            Self::Collectibles => "collectibles",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    /// On hand, available to list or sell
    InStock,
    /// Listed on one or more marketplaces
    Listed,
    /// Sold (a matching Sale row should exist)
    Sold,
}

/// A single inventory item (one physical unit)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Row identifier
    pub id: String,
    /// Manufacturer style code as entered by the user (may be messy)
    pub sku: String,
    /// Product name
    pub name: String,
    /// Brand name
    pub brand: Option<String>,
    /// Product category
    pub category: ProductCategory,
    /// Size label (e.g. "10.5", "L")
    pub size: Option<String>,
    /// Acquisition cost including fees, in `cost_currency`
    pub cost_basis: f64,
    /// Currency of the cost basis (ISO 4217)
    pub cost_currency: String,
    /// When the item was acquired
    pub acquired_at: DateTime<Utc>,
    /// Current lifecycle status
    pub status: InventoryStatus,
}

/// A completed sale of an inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    /// Row identifier
    pub id: String,
    /// Inventory item this sale closes out
    pub inventory_id: String,
    /// Marketplace the sale happened on (e.g. "stockx", "shopify")
    pub platform: String,
    /// Gross sale price in `currency`
    pub gross_amount: f64,
    /// Total marketplace/payment fees in `currency`
    pub fees: f64,
    /// Net proceeds (gross - fees) in `currency`
    pub net_amount: f64,
    /// Sale currency (ISO 4217)
    pub currency: String,
    /// When the sale completed
    pub sold_at: DateTime<Utc>,
}

impl Sale {
    /// Net proceeds; recomputed from gross and fees when the stored net
    /// disagrees with them by more than a cent
    #[must_use]
    pub fn effective_net(&self) -> f64 {
        let computed = self.gross_amount - self.fees;
        if (computed - self.net_amount).abs() > 0.01 {
            computed
        } else {
            self.net_amount
        }
    }
}
