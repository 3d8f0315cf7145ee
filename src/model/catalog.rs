use serde::{Deserialize, Serialize};
use std::fmt;

/// One product in the Alias catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Alias catalog identifier
    pub catalog_id: String,
    /// Manufacturer style code as the provider reports it
    pub sku: String,
    /// Product name
    pub name: String,
    /// Brand name
    pub brand: Option<String>,
}

/// Which heuristic produced a catalog match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Case-insensitive SKU equality
    ExactSku,
    /// Equality after SKU normalization
    NormalizedSku,
    /// Levenshtein distance on normalized SKUs
    FuzzySku,
    /// Token-set similarity on product names
    FuzzyName,
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ExactSku => "exact_sku",
            Self::NormalizedSku => "normalized_sku",
            Self::FuzzySku => "fuzzy_sku",
            Self::FuzzyName => "fuzzy_name",
        };
        f.write_str(s)
    }
}

/// Result of matching an inventory item against the Alias catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMatch {
    /// Matched Alias catalog identifier
    pub catalog_id: String,
    /// Heuristic that produced the match
    pub method: MatchMethod,
    /// Mapping confidence in 0.0..=1.0
    pub confidence: f64,
}
