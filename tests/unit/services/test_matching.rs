use crate::common::test_item;
use resale_desk::application::services::matching::match_inventory_to_alias_catalog;
use resale_desk::model::catalog::{CatalogEntry, MatchMethod};

fn entry(catalog_id: &str, sku: &str, name: &str) -> CatalogEntry {
    CatalogEntry {
        catalog_id: catalog_id.to_string(),
        sku: sku.to_string(),
        name: name.to_string(),
        brand: Some("Nike".to_string()),
    }
}

#[test]
fn exact_sku_match_is_certain() {
    let item = test_item("DD1391-100", "Dunk Low Black White");
    let catalog = vec![
        entry("cat-1", "DD1391-101", "Dunk Low University Blue"),
        entry("cat-2", "dd1391-100", "Dunk Low Black White"),
    ];

    let m = match_inventory_to_alias_catalog(&item, &catalog).unwrap();
    assert_eq!(m.catalog_id, "cat-2");
    assert_eq!(m.method, MatchMethod::ExactSku);
    assert_eq!(m.confidence, 1.0);
}

#[test]
fn normalized_sku_match_beats_fuzzy() {
    // Separator/spacing differences disappear under normalization
    let item = test_item("dd1391 100", "Dunk Low Black White");
    let catalog = vec![entry("cat-1", "DD1391/100", "Dunk Low Black White")];

    let m = match_inventory_to_alias_catalog(&item, &catalog).unwrap();
    assert_eq!(m.catalog_id, "cat-1");
    assert_eq!(m.method, MatchMethod::NormalizedSku);
    assert!((m.confidence - 0.95).abs() < 1e-9);
}

#[test]
fn fuzzy_sku_match_within_distance() {
    // One digit off after normalization
    let item = test_item("DD1391-100", "Dunk Low Black White");
    let catalog = vec![entry("cat-1", "DD1392-100", "Dunk Low Panda")];

    let m = match_inventory_to_alias_catalog(&item, &catalog).unwrap();
    assert_eq!(m.catalog_id, "cat-1");
    assert_eq!(m.method, MatchMethod::FuzzySku);
    assert!(m.confidence >= 0.80 && m.confidence < 0.95);
}

#[test]
fn fuzzy_name_match_when_skus_unusable() {
    let item = test_item("", "Jordan 1 Retro High OG Chicago");
    let catalog = vec![
        entry("cat-1", "", "Jordan 1 Retro High OG Chicago"),
        entry("cat-2", "", "Yeezy Boost 350 V2 Zebra"),
    ];

    let m = match_inventory_to_alias_catalog(&item, &catalog).unwrap();
    assert_eq!(m.catalog_id, "cat-1");
    assert_eq!(m.method, MatchMethod::FuzzyName);
    assert!(m.confidence >= 0.85);
}

#[test]
fn no_confident_match_returns_none() {
    let item = test_item("DD1391-100", "Dunk Low Black White");
    let catalog = vec![entry("cat-1", "GX9876", "Ultraboost Triple Black")];

    assert!(match_inventory_to_alias_catalog(&item, &catalog).is_none());
}

#[test]
fn empty_catalog_returns_none() {
    let item = test_item("DD1391-100", "Dunk Low Black White");
    assert!(match_inventory_to_alias_catalog(&item, &[]).is_none());
}

#[test]
fn distant_sku_not_fuzzy_matched() {
    // Distance 3 on normalized SKUs is past the fuzzy cutoff, and the names
    // share too few tokens
    let item = test_item("DD1391-100", "Dunk Low Black White");
    let catalog = vec![entry("cat-1", "DD1624-433", "Dunk High Game Royal")];

    assert!(match_inventory_to_alias_catalog(&item, &catalog).is_none());
}
