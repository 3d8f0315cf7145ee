//! Inventory-to-catalog matching
//!
//! Four heuristics tried in sequence, cheapest first:
//!
//! 1. exact SKU equality (case-insensitive)
//! 2. equality after SKU normalization
//! 3. fuzzy SKU via Levenshtein distance on normalized SKUs
//! 4. fuzzy name via token-set similarity
//!
//! The first tier that produces a confident result wins; an item with no
//! confident match stays unmapped rather than getting a bad mapping.

use crate::constants::{
    DEFAULT_BATCH_DELAY_MS, FUZZY_NAME_MIN_SIMILARITY, FUZZY_SKU_MAX_DISTANCE,
    MATCH_CONFIDENCE_THRESHOLD,
};
use crate::error::AppResult;
use crate::model::catalog::{CatalogEntry, CatalogMatch, MatchMethod};
use crate::model::inventory::InventoryItem;
use crate::storage::market_store::MarketStore;
use crate::transport::alias::AliasClient;
use crate::utils::sku::{levenshtein, name_similarity, normalize_sku_for_matching};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Matches one inventory item against a list of catalog candidates
///
/// Pure sequential-fallback logic; candidate retrieval is the caller's
/// concern. Returns `None` when no heuristic clears its confidence bar.
#[must_use]
pub fn match_inventory_to_alias_catalog(
    item: &InventoryItem,
    catalog: &[CatalogEntry],
) -> Option<CatalogMatch> {
    if catalog.is_empty() {
        return None;
    }

    let item_sku = item.sku.trim();

    // Tier 1: exact SKU
    if !item_sku.is_empty() {
        if let Some(entry) = catalog
            .iter()
            .find(|e| !e.sku.is_empty() && e.sku.trim().eq_ignore_ascii_case(item_sku))
        {
            return Some(CatalogMatch {
                catalog_id: entry.catalog_id.clone(),
                method: MatchMethod::ExactSku,
                confidence: 1.0,
            });
        }
    }

    let item_norm = normalize_sku_for_matching(item_sku);

    // Tier 2: normalized SKU
    if let Some(norm) = &item_norm {
        if let Some(entry) = catalog
            .iter()
            .find(|e| normalize_sku_for_matching(&e.sku).as_deref() == Some(norm.as_str()))
        {
            return Some(CatalogMatch {
                catalog_id: entry.catalog_id.clone(),
                method: MatchMethod::NormalizedSku,
                confidence: 0.95,
            });
        }
    }

    // Tier 3: fuzzy SKU (Levenshtein on normalized forms)
    if let Some(norm) = &item_norm {
        let closest = catalog
            .iter()
            .filter_map(|e| {
                let candidate = normalize_sku_for_matching(&e.sku)?;
                Some((e, levenshtein(norm, &candidate)))
            })
            .min_by_key(|(_, distance)| *distance);

        if let Some((entry, distance)) = closest {
            if distance > 0 && distance <= FUZZY_SKU_MAX_DISTANCE {
                let confidence = 0.92 - 0.05 * distance as f64;
                if confidence >= MATCH_CONFIDENCE_THRESHOLD {
                    debug!(
                        "Fuzzy SKU match for {}: {} (distance {})",
                        item.sku, entry.sku, distance
                    );
                    return Some(CatalogMatch {
                        catalog_id: entry.catalog_id.clone(),
                        method: MatchMethod::FuzzySku,
                        confidence,
                    });
                }
            }
        }
    }

    // Tier 4: fuzzy name
    let best_name = catalog
        .iter()
        .map(|e| (e, name_similarity(&item.name, &e.name)))
        .max_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((entry, similarity)) = best_name {
        if similarity >= FUZZY_NAME_MIN_SIMILARITY {
            debug!(
                "Fuzzy name match for '{}': '{}' (similarity {:.2})",
                item.name, entry.name, similarity
            );
            return Some(CatalogMatch {
                catalog_id: entry.catalog_id.clone(),
                method: MatchMethod::FuzzyName,
                confidence: similarity,
            });
        }
    }

    None
}

/// Matches inventory items against the live Alias catalog
pub struct MatchingService {
    alias: Arc<AliasClient>,
    store: Option<MarketStore>,
    batch_delay: Duration,
}

impl MatchingService {
    /// Creates a new matching service
    pub fn new(alias: Arc<AliasClient>) -> Self {
        Self {
            alias,
            store: None,
            batch_delay: Duration::from_millis(DEFAULT_BATCH_DELAY_MS),
        }
    }

    /// Persists confident matches from batch runs as catalog mappings
    #[must_use]
    pub fn with_store(mut self, store: MarketStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Overrides the delay between batch-match calls
    #[must_use]
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Fetches candidates for one item and runs the matching heuristics
    ///
    /// Candidates are looked up by raw SKU, then by normalized SKU, then by
    /// product name, widening the net only when the narrower search came back
    /// empty.
    pub async fn match_item(&self, item: &InventoryItem) -> AppResult<Option<CatalogMatch>> {
        let mut candidates = if item.sku.trim().is_empty() {
            Vec::new()
        } else {
            self.alias.search_by_sku(item.sku.trim()).await?
        };

        if candidates.is_empty() {
            if let Some(norm) = normalize_sku_for_matching(&item.sku) {
                candidates = self.alias.search_by_sku(&norm).await?;
            }
        }

        if candidates.is_empty() {
            candidates = self.alias.search_by_name(&item.name).await?;
        }

        Ok(match_inventory_to_alias_catalog(item, &candidates))
    }

    /// Matches a batch of items, sleeping between calls to stay polite to
    /// the Alias API
    ///
    /// When a store is configured, every match is persisted as the item's
    /// catalog mapping. Best effort: a failed lookup or save logs and moves
    /// on.
    pub async fn match_batch(
        &self,
        items: &[InventoryItem],
    ) -> Vec<(String, Option<CatalogMatch>)> {
        let mut results = Vec::with_capacity(items.len());

        for (i, item) in items.iter().enumerate() {
            let matched = match self.match_item(item).await {
                Ok(m) => m,
                Err(e) => {
                    warn!("Catalog match failed for {}: {}", item.id, e);
                    None
                }
            };

            if let (Some(store), Some(mapping)) = (&self.store, &matched) {
                if let Err(e) = store.save_mapping(&item.id, mapping).await {
                    warn!("Failed to persist catalog mapping for {}: {}", item.id, e);
                }
            }

            results.push((item.id.clone(), matched));

            if i + 1 < items.len() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        let matched_count = results.iter().filter(|(_, m)| m.is_some()).count();
        info!("Matched {}/{} items to the Alias catalog", matched_count, items.len());
        results
    }
}
