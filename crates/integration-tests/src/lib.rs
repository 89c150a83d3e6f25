//! Integration test support for the ShopPrime client.
//!
//! Tests here exercise the full request/response path against a wiremock
//! server: the error envelope, catalog caching, auth-driven cart
//! lifecycle, and mutation ordering. Run with `cargo test -p
//! shopprime-integration-tests`.

use std::time::Duration;

use shopprime_client::api::ApiClient;
use shopprime_client::cart::{CartPhase, CartStore};
use shopprime_client::config::ClientConfig;

/// Start a wiremock server with the given mocks and an [`ApiClient`]
/// pointed at it.
///
/// Keep the returned server alive for the whole test; dropping it before
/// the end skips `expect` verification.
///
/// # Panics
///
/// Panics if the mock server's URI is not a valid client configuration,
/// which cannot happen in practice.
pub async fn start_api_mock(mocks: Vec<wiremock::Mock>) -> (wiremock::MockServer, ApiClient) {
    let server = wiremock::MockServer::start().await;

    for mock in mocks {
        server.register(mock).await;
    }

    let config = ClientConfig::new(&server.uri()).expect("mock server uri is a valid base url");
    let api = ApiClient::new(&config);

    (server, api)
}

/// Wait until the store reaches `phase`, or time out.
///
/// The auth watcher runs on a spawned task, so tests that trigger a
/// transition need to yield until the resulting lifecycle change lands.
///
/// # Panics
///
/// Panics if the store has not reached `phase` within two seconds.
pub async fn wait_for_phase(store: &CartStore, phase: CartPhase) {
    for _ in 0..200u32 {
        if store.phase() == phase {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "cart store never reached {phase:?}, still {:?}",
        store.phase()
    );
}

/// A cart line as the backend serializes it.
#[must_use]
pub fn cart_line(id: &str, product_id: &str, quantity: u32, price: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "productId": product_id,
        "quantity": quantity,
        "price": price,
    })
}
