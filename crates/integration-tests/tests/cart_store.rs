//! Cart store lifecycle and ordering tests against a mock backend.

use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use shopprime_client::auth::AuthBroker;
use shopprime_client::cart::{CartPhase, CartStore};
use shopprime_core::{CartItemId, ProductId};
use shopprime_integration_tests::{cart_line, start_api_mock, wait_for_phase};

fn me_body() -> serde_json::Value {
    json!({
        "id": "u1",
        "name": "Ada",
        "email": "ada@example.com",
        "createdAt": "2026-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_sign_in_triggers_exactly_one_load() {
    let (server, api) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(me_body())),
        Mock::given(method("GET"))
            .and(path("/cart"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [cart_line("a", "p1", 2, 10)]
            })))
            .expect(1),
    ])
    .await;

    let broker = AuthBroker::new(api.clone());
    let store = CartStore::create(api, broker.subscribe());
    assert_eq!(store.phase(), CartPhase::Uninitialized);

    broker.resume().await.expect("resume succeeds");
    wait_for_phase(&store, CartPhase::Ready).await;
    assert_eq!(store.count(), 2);

    // Re-publishing an already-signed-in state is not a transition and
    // must not reload.
    broker.resume().await.expect("resume succeeds");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(store.count(), 2);

    store.teardown();
    drop(server);
}

#[tokio::test]
async fn test_sign_out_clears_locally_without_network() {
    let (server, api) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(me_body())),
        Mock::given(method("GET"))
            .and(path("/cart"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [cart_line("a", "p1", 1, 15)]
            })))
            .expect(1),
    ])
    .await;

    let broker = AuthBroker::new(api.clone());
    let store = CartStore::create(api, broker.subscribe());

    broker.resume().await.expect("resume succeeds");
    wait_for_phase(&store, CartPhase::Ready).await;
    assert_eq!(store.count(), 1);

    broker.sign_out();
    wait_for_phase(&store, CartPhase::Uninitialized).await;
    assert_eq!(store.count(), 0);
    assert!(store.items().is_empty());

    store.teardown();
    // The single expected GET /cart verifies sign-out issued no request.
    drop(server);
}

#[tokio::test]
async fn test_zero_quantity_never_reaches_the_wire() {
    let (server, api) = start_api_mock(vec![
        Mock::given(method("PUT"))
            .and(path("/cart/a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(0),
    ])
    .await;

    let broker = AuthBroker::new(api.clone());
    let store = CartStore::create(api, broker.subscribe());

    let err = store
        .update_quantity(&CartItemId::new("a"), 0)
        .await
        .expect_err("zero quantity must be rejected");
    assert_eq!(err.message(), "Quantity must be at least 1");
    assert_eq!(store.phase(), CartPhase::Uninitialized);

    store.teardown();
    drop(server);
}

#[tokio::test]
async fn test_mutations_apply_in_issuance_order() {
    let (server, api) = start_api_mock(vec![
        // A slow add whose response lands long after the remove is issued.
        Mock::given(method("POST"))
            .and(path("/cart"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(200))
                    .set_body_json(json!({ "items": [cart_line("a", "p1", 1, 10)] })),
            )
            .expect(1),
        Mock::given(method("DELETE"))
            .and(path("/cart/a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(1),
    ])
    .await;

    let broker = AuthBroker::new(api.clone());
    let store = CartStore::create(api, broker.subscribe());

    let slow_add = tokio::spawn({
        let store = store.clone();
        async move { store.add_item(&ProductId::new("p1"), 1).await }
    });
    // Let the add claim the operation slot first.
    tokio::time::sleep(Duration::from_millis(50)).await;

    store
        .remove_item(&CartItemId::new("a"))
        .await
        .expect("remove succeeds");
    slow_add
        .await
        .expect("add task joins")
        .expect("add succeeds");

    // The remove waited for the slow add, so its (empty) response is the
    // one that sticks: the deleted line is never resurrected.
    assert!(store.items().is_empty());
    assert_eq!(store.count(), 0);

    store.teardown();
    drop(server);
}

#[tokio::test]
async fn test_count_and_total_track_last_response() {
    let (server, api) = start_api_mock(vec![
        Mock::given(method("POST"))
            .and(path("/cart"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [cart_line("a", "p1", 2, 10), cart_line("b", "p2", 1, 5)]
            }))),
        Mock::given(method("PUT"))
            .and(path("/cart/a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [cart_line("a", "p1", 5, 10), cart_line("b", "p2", 1, 5)]
            }))),
        Mock::given(method("DELETE"))
            .and(path("/cart/b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [cart_line("a", "p1", 5, 10)]
            }))),
    ])
    .await;

    let broker = AuthBroker::new(api.clone());
    let store = CartStore::create(api, broker.subscribe());

    store
        .add_item(&ProductId::new("p1"), 2)
        .await
        .expect("add succeeds");
    assert_eq!(store.count(), 3);
    assert_eq!(store.total(), Decimal::from(25));

    store
        .update_quantity(&CartItemId::new("a"), 5)
        .await
        .expect("update succeeds");
    assert_eq!(store.count(), 6);
    assert_eq!(store.total(), Decimal::from(55));

    store
        .remove_item(&CartItemId::new("b"))
        .await
        .expect("remove succeeds");
    assert_eq!(store.count(), 5);
    assert_eq!(store.total(), Decimal::from(50));

    store.teardown();
    drop(server);
}
