use crate::common::{test_config, test_item};
use resale_desk::application::rate_limiter::RateLimiter;
use resale_desk::application::services::MatchingService;
use resale_desk::model::catalog::MatchMethod;
use resale_desk::transport::alias::AliasClient;
use std::sync::Arc;
use std::time::Duration;

fn client_for(server: &mockito::Server) -> AliasClient {
    let config = Arc::new(test_config(&server.url()));
    let limiter = RateLimiter::new(&config.rate_limiter);
    AliasClient::new(config, limiter).unwrap()
}

#[tokio::test]
async fn search_parses_catalog_entries() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/catalog/search")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"products":[{"catalog_id":"alias-1","sku":"DD1391-100","name":"Dunk Low Black White","brand_name":"Nike"}]}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);

    let entries = client.search_by_sku("DD1391-100").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].catalog_id, "alias-1");
    assert_eq!(entries[0].sku, "DD1391-100");
    assert_eq!(entries[0].brand.as_deref(), Some("Nike"));
}

#[tokio::test]
async fn pricing_converts_cents_to_major_units() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/pricing_insights")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"lowest_listing_price_cents":15250,"highest_offer_cents":14100,"last_sold_price_cents":14900,"currency":"USD"}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);

    let quote = client.get_pricing("alias-1").await.unwrap().unwrap();
    assert_eq!(quote.lowest_ask, Some(152.50));
    assert_eq!(quote.highest_bid, Some(141.00));
    assert_eq!(quote.last_sale, Some(149.00));
}

#[tokio::test]
async fn pricing_without_listings_or_offers_is_none() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/pricing_insights")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"lowest_listing_price_cents":null,"highest_offer_cents":null,"last_sold_price_cents":null,"currency":null}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);

    let quote = client.get_pricing("alias-1").await.unwrap();
    assert!(quote.is_none());
}

#[tokio::test]
async fn matching_service_maps_item_through_live_search() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/catalog/search")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"products":[{"catalog_id":"alias-7","sku":"DD1391/100","name":"Dunk Low Black White","brand_name":"Nike"}]}"#,
        )
        .create_async()
        .await;

    let client = Arc::new(client_for(&server));
    let service = MatchingService::new(client).with_batch_delay(Duration::from_millis(1));

    let item = test_item("dd1391 100", "Dunk Low Black White");
    let m = service.match_item(&item).await.unwrap().unwrap();
    assert_eq!(m.catalog_id, "alias-7");
    assert_eq!(m.method, MatchMethod::NormalizedSku);
}

#[tokio::test]
async fn batch_matching_yields_one_mapping_per_item() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/catalog/search")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"products":[{"catalog_id":"alias-7","sku":"DD1391/100","name":"Dunk Low Black White","brand_name":"Nike"}]}"#,
        )
        .create_async()
        .await;

    let client = Arc::new(client_for(&server));
    let service = MatchingService::new(client).with_batch_delay(Duration::from_millis(1));

    let matched = test_item("DD1391-100", "Dunk Low Black White");
    let mut unmatched = test_item("ZZ9999", "Completely Different Product");
    unmatched.id = "inv-2".to_string();

    let results = service.match_batch(&[matched, unmatched]).await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, "inv-1");
    assert_eq!(
        results[0].1.as_ref().map(|m| m.catalog_id.as_str()),
        Some("alias-7")
    );
    assert_eq!(results[1].0, "inv-2");
    assert!(results[1].1.is_none());
}
