use crate::common::test_config;
use resale_desk::application::rate_limiter::RateLimiter;
use resale_desk::error::AppError;
use resale_desk::model::retry::RetryConfig;
use resale_desk::transport::stockx::StockxClient;
use std::sync::Arc;

const TOKEN_BODY: &str = r#"{"access_token":"test-token","expires_in":3600,"token_type":"Bearer"}"#;

fn client_for(server: &mockito::Server) -> StockxClient {
    let config = Arc::new(test_config(&server.url()));
    let limiter = RateLimiter::new(&config.rate_limiter);
    StockxClient::new(config, limiter)
        .unwrap()
        .with_retry(RetryConfig::with_max_retries_and_delay(2, 1))
}

#[tokio::test]
async fn token_is_cached_across_requests() {
    let mut server = mockito::Server::new_async().await;

    let token_mock = server
        .mock("POST", "/oauth/token")
        .with_status(200)
        .with_body(TOKEN_BODY)
        .expect(1)
        .create_async()
        .await;

    let search_mock = server
        .mock("GET", "/catalog/search")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"products":[{"productId":"p1","styleId":"DD1391-100","title":"Dunk Low","brand":"Nike"}]}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);

    let first = client.search_catalog("DD1391-100").await.unwrap();
    let second = client.search_catalog("DD1391-100").await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first[0].product_id, "p1");
    assert_eq!(second.len(), 1);

    // One token grant serves both requests
    token_mock.assert_async().await;
    search_mock.assert_async().await;
}

#[tokio::test]
async fn retries_on_429_until_exhausted() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/oauth/token")
        .with_status(200)
        .with_body(TOKEN_BODY)
        .create_async()
        .await;

    // Initial attempt plus two retries
    let search_mock = server
        .mock("GET", "/catalog/search")
        .match_query(mockito::Matcher::Any)
        .with_status(429)
        .expect(3)
        .create_async()
        .await;

    let client = client_for(&server);

    let err = client.search_catalog("DD1391-100").await.unwrap_err();
    assert!(matches!(err, AppError::RateLimitExceeded));

    search_mock.assert_async().await;
}

#[tokio::test]
async fn retry_after_header_overrides_backoff() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/oauth/token")
        .with_status(200)
        .with_body(TOKEN_BODY)
        .create_async()
        .await;

    let search_mock = server
        .mock("GET", "/catalog/search")
        .match_query(mockito::Matcher::Any)
        .with_status(429)
        .with_header("Retry-After", "0")
        .expect(2)
        .create_async()
        .await;

    // Configured backoff is 5s per attempt; the header says retry at once
    let config = Arc::new(test_config(&server.url()));
    let limiter = RateLimiter::new(&config.rate_limiter);
    let client = StockxClient::new(config, limiter)
        .unwrap()
        .with_retry(RetryConfig::with_max_retries_and_delay(1, 5_000));

    let started = std::time::Instant::now();
    let err = client.search_catalog("DD1391-100").await.unwrap_err();
    assert!(matches!(err, AppError::RateLimitExceeded));
    assert!(started.elapsed() < std::time::Duration::from_secs(2));

    search_mock.assert_async().await;
}

#[tokio::test]
async fn retries_on_server_error() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/oauth/token")
        .with_status(200)
        .with_body(TOKEN_BODY)
        .create_async()
        .await;

    let search_mock = server
        .mock("GET", "/catalog/search")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let client = client_for(&server);

    let err = client.search_catalog("DD1391-100").await.unwrap_err();
    assert!(matches!(err, AppError::Unexpected(status) if status.as_u16() == 503));

    search_mock.assert_async().await;
}

#[tokio::test]
async fn refreshes_token_once_on_401() {
    let mut server = mockito::Server::new_async().await;

    // Two grants: the initial one and the refresh triggered by the 401
    let token_mock = server
        .mock("POST", "/oauth/token")
        .with_status(200)
        .with_body(TOKEN_BODY)
        .expect(2)
        .create_async()
        .await;

    let search_mock = server
        .mock("GET", "/catalog/search")
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);

    let err = client.search_catalog("DD1391-100").await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    token_mock.assert_async().await;
    search_mock.assert_async().await;
}

#[tokio::test]
async fn failed_token_grant_is_unauthorized() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/oauth/token")
        .with_status(403)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .create_async()
        .await;

    let client = client_for(&server);

    let err = client.search_catalog("DD1391-100").await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
}

#[tokio::test]
async fn market_data_parses_amounts() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/oauth/token")
        .with_status(200)
        .with_body(TOKEN_BODY)
        .create_async()
        .await;

    server
        .mock("GET", "/catalog/products/p1/market-data")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"lowestAskAmount":152.0,"highestBidAmount":141.0,"currencyCode":"USD"}"#)
        .create_async()
        .await;

    let client = client_for(&server);

    let market = client.get_market_data("p1", "USD").await.unwrap();
    assert_eq!(market.lowest_ask_amount, Some(152.0));
    assert_eq!(market.highest_bid_amount, Some(141.0));
    assert_eq!(market.currency_code.as_deref(), Some("USD"));
}
