//! API client tests: caching, error envelope, auth header wiring.

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use shopprime_client::api::types::{ProductFilters, ProductInput, ShippingAddress};
use shopprime_client::auth::AuthBroker;
use shopprime_client::error::ApiError;
use shopprime_core::{OrderStatus, ProductId};
use shopprime_integration_tests::start_api_mock;

fn product_body(id: &str, price: u32) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Runner",
        "category": "footwear",
        "price": price,
        "stock": 3
    })
}

#[tokio::test]
async fn test_product_cached_until_invalidated() {
    let (server, api) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/products/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_body("p1", 20)))
            .expect(2),
        Mock::given(method("PUT"))
            .and(path("/admin/products/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_body("p1", 25))),
    ])
    .await;

    let id = ProductId::new("p1");
    let first = api.get_product(&id).await.expect("fetch succeeds");
    let second = api.get_product(&id).await.expect("fetch succeeds");
    assert_eq!(first.price, second.price);

    // Admin update invalidates the cached entry, forcing a refetch.
    let input = ProductInput {
        name: "Runner".to_string(),
        description: String::new(),
        brand: String::new(),
        category: "footwear".to_string(),
        price: Decimal::from(25),
        discount_price: None,
        images: Vec::new(),
        stock: 3,
        is_featured: false,
    };
    api.admin_update_product(&id, &input)
        .await
        .expect("update succeeds");
    api.get_product(&id).await.expect("fetch succeeds");

    drop(server);
}

#[tokio::test]
async fn test_only_default_listing_is_cached() {
    let (server, api) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [product_body("p1", 20)]
            })))
            .expect(3),
    ])
    .await;

    let default = ProductFilters::default();
    api.get_products(&default).await.expect("fetch succeeds");
    api.get_products(&default).await.expect("fetch succeeds");

    let search = ProductFilters {
        search: Some("runner".to_string()),
        ..ProductFilters::default()
    };
    api.get_products(&search).await.expect("fetch succeeds");
    api.get_products(&search).await.expect("fetch succeeds");

    drop(server);
}

#[tokio::test]
async fn test_filters_render_as_query_params() {
    let (server, api) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("search", "shoes"))
            .and(query_param("sort", "price_low"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] }))),
    ])
    .await;

    let filters = ProductFilters {
        search: Some("shoes".to_string()),
        sort: shopprime_client::api::types::ProductSort::PriceLowToHigh,
        ..ProductFilters::default()
    };
    let products = api.get_products(&filters).await.expect("fetch succeeds");
    assert!(products.is_empty());

    drop(server);
}

#[tokio::test]
async fn test_service_error_surfaces_backend_message() {
    let (server, api) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/products/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "message": "Product not found" })),
            ),
    ])
    .await;

    let err = api
        .get_product(&ProductId::new("missing"))
        .await
        .expect_err("missing product must fail");

    match err {
        ApiError::Service { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message.as_deref(), Some("Product not found"));
        }
        other => panic!("expected service error, got {other:?}"),
    }

    drop(server);
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let (server, api) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/products/p1"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7")),
    ])
    .await;

    let err = api
        .get_product(&ProductId::new("p1"))
        .await
        .expect_err("rate limited request must fail");
    assert!(matches!(err, ApiError::RateLimited(7)));

    drop(server);
}

#[tokio::test]
async fn test_place_order_and_history() {
    let order = json!({
        "id": "o1",
        "items": [{
            "id": "a",
            "productId": "p1",
            "name": "Runner",
            "quantity": 2,
            "price": 20
        }],
        "total": 40,
        "orderStatus": "placed",
        "paymentStatus": "pending",
        "shippingAddress": {
            "label": "Home",
            "line1": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "pincode": "62704",
            "country": "USA"
        },
        "createdAt": "2026-02-01T12:00:00Z"
    });
    let (server, api) = start_api_mock(vec![
        Mock::given(method("POST"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(201).set_body_json(order.clone())),
        Mock::given(method("GET"))
            .and(path("/orders/my"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([order]))),
    ])
    .await;

    let address = ShippingAddress {
        label: "Home".to_string(),
        line1: "1 Main St".to_string(),
        line2: None,
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        pincode: "62704".to_string(),
        country: "USA".to_string(),
    };
    let placed = api
        .place_order(address, None)
        .await
        .expect("placement succeeds");
    assert_eq!(placed.total, Decimal::from(40));
    assert_eq!(placed.order_status, OrderStatus::Placed);

    let history = api.my_orders().await.expect("history succeeds");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].items.len(), 1);

    drop(server);
}

#[tokio::test]
async fn test_sign_in_installs_bearer_token() {
    let me = json!({
        "id": "u1",
        "name": "Ada",
        "email": "ada@example.com",
        "createdAt": "2026-01-01T00:00:00Z"
    });
    let (server, api) = start_api_mock(vec![
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "tok-1",
                "user": me.clone()
            }))),
        // Only a request carrying the issued token matches.
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(me))
            .expect(1),
    ])
    .await;

    let broker = AuthBroker::new(api.clone());
    broker
        .sign_in("ada@example.com", "hunter2")
        .await
        .expect("sign in succeeds");

    let user = api.me().await.expect("authenticated call succeeds");
    assert_eq!(user.email, "ada@example.com");

    drop(server);
}
