use crate::common::test_quote;
use resale_desk::application::services::pricing::{aggregate_prices, priority_provider};
use resale_desk::model::inventory::ProductCategory;
use resale_desk::model::market::{MarketQuote, PriceBasis, PriceConfidence, Provider};

fn quote_in(provider: Provider, ask: f64, currency: &str) -> MarketQuote {
    let mut quote = test_quote(provider, Some(ask), None);
    quote.currency = currency.to_string();
    quote
}

#[test]
fn priority_providers_per_category() {
    assert_eq!(
        priority_provider(ProductCategory::Sneakers),
        Some(Provider::Stockx)
    );
    assert_eq!(
        priority_provider(ProductCategory::Streetwear),
        Some(Provider::Alias)
    );
    assert_eq!(
        priority_provider(ProductCategory::Collectibles),
        Some(Provider::Ebay)
    );
    assert_eq!(priority_provider(ProductCategory::Other), None);
}

#[test]
fn priority_provider_wins_for_its_category() {
    let quotes = vec![
        test_quote(Provider::Ebay, Some(90.0), None),
        test_quote(Provider::Stockx, Some(150.0), Some(140.0)),
        test_quote(Provider::Alias, Some(145.0), Some(130.0)),
    ];

    let agg = aggregate_prices(&quotes, ProductCategory::Sneakers).unwrap();
    assert_eq!(agg.value, 150.0);
    assert_eq!(agg.basis, PriceBasis::Priority(Provider::Stockx));
    assert_eq!(agg.confidence, PriceConfidence::High);
    assert_eq!(agg.sample_size, 3);
    // Best bid is taken across all providers, not just the priority one
    assert_eq!(agg.highest_bid, Some(140.0));
}

#[test]
fn consensus_median_when_priority_absent() {
    let quotes = vec![
        test_quote(Provider::Alias, Some(100.0), None),
        test_quote(Provider::Ebay, Some(110.0), None),
    ];

    let agg = aggregate_prices(&quotes, ProductCategory::Sneakers).unwrap();
    assert_eq!(agg.value, 105.0);
    assert_eq!(agg.basis, PriceBasis::Consensus);
    assert_eq!(agg.confidence, PriceConfidence::High);
}

#[test]
fn consensus_odd_count_takes_middle() {
    let quotes = vec![
        test_quote(Provider::Stockx, Some(100.0), None),
        test_quote(Provider::Alias, Some(120.0), None),
        test_quote(Provider::Ebay, Some(110.0), None),
    ];

    let agg = aggregate_prices(&quotes, ProductCategory::Other).unwrap();
    assert_eq!(agg.value, 110.0);
    assert_eq!(agg.basis, PriceBasis::Consensus);
}

#[test]
fn wide_spread_flags_low_confidence() {
    // Spread (200 - 100) / 150 = 0.67, well above the threshold
    let quotes = vec![
        test_quote(Provider::Alias, Some(100.0), None),
        test_quote(Provider::Ebay, Some(200.0), None),
    ];

    let agg = aggregate_prices(&quotes, ProductCategory::Other).unwrap();
    assert_eq!(agg.confidence, PriceConfidence::Low);
}

#[test]
fn quotes_without_asks_are_ignored() {
    let quotes = vec![
        test_quote(Provider::Stockx, None, Some(140.0)),
        test_quote(Provider::Alias, Some(100.0), None),
    ];

    let agg = aggregate_prices(&quotes, ProductCategory::Sneakers).unwrap();
    // StockX is priority for sneakers but has no ask, so consensus applies
    assert_eq!(agg.basis, PriceBasis::Consensus);
    assert_eq!(agg.value, 100.0);
    assert_eq!(agg.sample_size, 1);
}

#[test]
fn consensus_ignores_foreign_currency_quotes() {
    // A EUR quote must not be averaged with USD asks as if commensurable
    let quotes = vec![
        quote_in(Provider::Alias, 100.0, "USD"),
        quote_in(Provider::Ebay, 95.0, "EUR"),
        quote_in(Provider::Stockx, 110.0, "USD"),
    ];

    let agg = aggregate_prices(&quotes, ProductCategory::Other).unwrap();
    assert_eq!(agg.currency, "USD");
    assert_eq!(agg.value, 105.0);
    assert_eq!(agg.sample_size, 2);
}

#[test]
fn consensus_currency_tie_keeps_first_quoted() {
    let quotes = vec![
        quote_in(Provider::Alias, 100.0, "USD"),
        quote_in(Provider::Ebay, 95.0, "EUR"),
    ];

    let agg = aggregate_prices(&quotes, ProductCategory::Other).unwrap();
    assert_eq!(agg.currency, "USD");
    assert_eq!(agg.value, 100.0);
    assert_eq!(agg.sample_size, 1);
}

#[test]
fn bids_only_counted_in_the_aggregated_currency() {
    let mut eur = quote_in(Provider::Ebay, 95.0, "EUR");
    eur.highest_bid = Some(200.0);
    let quotes = vec![
        quote_in(Provider::Alias, 100.0, "USD"),
        quote_in(Provider::Stockx, 110.0, "USD"),
        eur,
    ];

    let agg = aggregate_prices(&quotes, ProductCategory::Other).unwrap();
    // The EUR bid would be the max, but it is not in the aggregated currency
    assert_eq!(agg.highest_bid, None);
}

#[test]
fn empty_input_yields_none() {
    assert!(aggregate_prices(&[], ProductCategory::Sneakers).is_none());

    let bidless = vec![test_quote(Provider::Stockx, None, Some(140.0))];
    assert!(aggregate_prices(&bidless, ProductCategory::Sneakers).is_none());
}
