use crate::common::test_config;
use resale_desk::application::rate_limiter::RateLimiter;
use resale_desk::transport::shopify::ShopifyClient;
use std::sync::Arc;

const ORDERS_BODY: &str = r##"{
    "orders": [
        {
            "id": 820982911946154500,
            "name": "#1001",
            "total_price": "245.00",
            "currency": "USD",
            "created_at": "2024-06-01T12:00:00-04:00",
            "line_items": [
                {"title": "Dunk Low Black White", "sku": "DD1391-100", "quantity": 1, "price": "245.00"}
            ]
        }
    ]
}"##;

fn client_for(server: &mockito::Server) -> ShopifyClient {
    let config = Arc::new(test_config(&server.url()));
    let limiter = RateLimiter::new(&config.rate_limiter);
    ShopifyClient::new(config, limiter).unwrap()
}

#[tokio::test]
async fn recent_orders_parse_and_carry_the_page_limit() {
    let mut server = mockito::Server::new_async().await;

    // page_size 10 from the test config becomes the orders page limit
    let mock = server
        .mock("GET", "/admin/api/2024-01/orders.json")
        .match_query(mockito::Matcher::UrlEncoded(
            "limit".to_string(),
            "10".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ORDERS_BODY)
        .create_async()
        .await;

    let client = client_for(&server);

    let orders = client.list_recent_orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].name, "#1001");
    assert_eq!(orders[0].total_price, "245.00");
    assert_eq!(orders[0].line_items.len(), 1);
    assert_eq!(orders[0].line_items[0].sku.as_deref(), Some("DD1391-100"));

    mock.assert_async().await;
}
