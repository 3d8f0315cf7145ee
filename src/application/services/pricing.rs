//! Cross-provider price aggregation
//!
//! One pure function over a slice of quotes. Each product category has a
//! priority provider whose quote wins outright when present; otherwise the
//! asks are reconciled to their median and the result is flagged low
//! confidence when the quotes disagree too much.

use crate::constants::AGGREGATION_SPREAD_THRESHOLD;
use crate::model::inventory::ProductCategory;
use crate::model::market::{
    AggregatedPrice, MarketQuote, PriceBasis, PriceConfidence, Provider,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

static PRIORITY_PROVIDERS: Lazy<HashMap<ProductCategory, Provider>> = Lazy::new(|| {
    HashMap::from([
        (ProductCategory::Sneakers, Provider::Stockx),
        (ProductCategory::Streetwear, Provider::Alias),
        (ProductCategory::Collectibles, Provider::Ebay),
    ])
});

/// Returns the pricing authority for a category, if one is designated
#[must_use]
pub fn priority_provider(category: ProductCategory) -> Option<Provider> {
    PRIORITY_PROVIDERS.get(&category).copied()
}

/// Reconciles provider quotes into a single market price
///
/// Quotes without a lowest ask are ignored. When the category's priority
/// provider is among the remaining quotes its ask is used directly at high
/// confidence; otherwise the median ask is taken and confidence drops to low
/// when the relative spread (max - min over median) exceeds the variance
/// threshold. Quotes can arrive in different currencies; medians and bids are
/// only taken over quotes sharing one currency (the one most quotes use), and
/// the result's `currency` reflects what was actually aggregated. Returns
/// `None` when no quote carries an ask.
#[must_use]
pub fn aggregate_prices(
    quotes: &[MarketQuote],
    category: ProductCategory,
) -> Option<AggregatedPrice> {
    let asked: Vec<(&MarketQuote, f64)> = quotes
        .iter()
        .filter_map(|q| q.lowest_ask.map(|ask| (q, ask)))
        .collect();

    if asked.is_empty() {
        return None;
    }

    if let Some(priority) = priority_provider(category) {
        if let Some((quote, value)) = asked.iter().find(|(q, _)| q.provider == priority) {
            debug!(
                "Using priority provider {} for {} ({})",
                priority, quote.sku, value
            );
            let highest_bid = best_bid_in(&asked, &quote.currency);
            return Some(AggregatedPrice {
                value: *value,
                highest_bid,
                currency: quote.currency.clone(),
                basis: PriceBasis::Priority(priority),
                confidence: PriceConfidence::High,
                sample_size: asked.len(),
                computed_at: Utc::now(),
            });
        }
    }

    let currency = consensus_currency(&asked).to_string();
    let mut asks: Vec<f64> = asked
        .iter()
        .filter(|(q, _)| q.currency == currency)
        .map(|(_, ask)| *ask)
        .collect();
    asks.sort_by(|a, b| a.total_cmp(b));

    let value = median(&asks);
    let spread = (asks[asks.len() - 1] - asks[0]) / value.max(f64::EPSILON);

    let confidence = if spread > AGGREGATION_SPREAD_THRESHOLD {
        PriceConfidence::Low
    } else {
        PriceConfidence::High
    };

    let highest_bid = best_bid_in(&asked, &currency);

    Some(AggregatedPrice {
        value,
        highest_bid,
        currency,
        basis: PriceBasis::Consensus,
        confidence,
        sample_size: asks.len(),
        computed_at: Utc::now(),
    })
}

/// Currency shared by the most asking quotes; earliest quote breaks ties
fn consensus_currency<'a>(asked: &[(&'a MarketQuote, f64)]) -> &'a str {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (q, _) in asked {
        *counts.entry(q.currency.as_str()).or_insert(0) += 1;
    }

    let mut best = asked[0].0.currency.as_str();
    for (q, _) in asked {
        if counts[q.currency.as_str()] > counts[best] {
            best = q.currency.as_str();
        }
    }
    best
}

/// Best bid among quotes denominated in the given currency
fn best_bid_in(asked: &[(&MarketQuote, f64)], currency: &str) -> Option<f64> {
    asked
        .iter()
        .filter(|(q, _)| q.currency == currency)
        .filter_map(|(q, _)| q.highest_bid)
        .max_by(|a, b| a.total_cmp(b))
}

/// Median of a sorted, non-empty slice
fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
