//! Cart synchronization store.
//!
//! [`CartStore`] is the single source of truth for the cart within the
//! client process. Local state is always a materialized copy of the last
//! successful server response: no mutation is applied optimistically, and
//! every mutating operation replaces the whole item collection from the
//! response, so server-side stock and pricing logic can never drift from
//! what the client shows.
//!
//! Mutating operations are serialized through a single-slot async lock held
//! across the entire round trip. Two concurrent calls therefore apply their
//! responses in issuance order - a slow `add_item` can never resurrect a
//! line that a later `remove_item` already deleted.
//!
//! The store's lifecycle is driven by authentication transitions delivered
//! over the watch channel wired in at [`CartStore::create`]: signing in
//! triggers exactly one [`load`](CartStore::load), signing out clears the
//! items locally without a network call.

use std::sync::{Arc, Mutex as StdMutex};

use rust_decimal::Decimal;
use tokio::sync::{Mutex as AsyncMutex, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use shopprime_core::{CartItemId, ProductId};

use crate::api::ApiClient;
use crate::api::types::{CartItem, CartSnapshot};
use crate::auth::AuthState;
use crate::error::{ApiError, CartError};

/// Store lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartPhase {
    /// No session yet; items are empty.
    #[default]
    Uninitialized,
    /// Initial fetch in flight.
    Loading,
    /// In sync with the last successful server response.
    Ready,
    /// A mutating operation's round trip is in flight.
    Mutating,
}

#[derive(Debug, Default)]
struct CartState {
    items: Vec<CartItem>,
    phase: CartPhase,
}

/// Process-wide cart store. Cloning is cheap; every clone shares state.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    api: ApiClient,
    state: StdMutex<CartState>,
    /// Single-slot queue: a mutating call waits here until the prior one
    /// settles, guaranteeing issuance-order application of responses.
    op_slot: AsyncMutex<()>,
    watcher: StdMutex<Option<JoinHandle<()>>>,
}

impl CartStore {
    /// Create the store and wire it to authentication transitions.
    ///
    /// Spawns a watcher task that calls [`load`](Self::load) once per
    /// signed-out to signed-in transition (including a session already
    /// present at creation) and clears local state on sign-out. End the
    /// watcher with [`teardown`](Self::teardown).
    #[must_use]
    pub fn create(api: ApiClient, auth: watch::Receiver<AuthState>) -> Self {
        let store = Self {
            inner: Arc::new(CartStoreInner {
                api,
                state: StdMutex::new(CartState::default()),
                op_slot: AsyncMutex::new(()),
                watcher: StdMutex::new(None),
            }),
        };

        let watcher = tokio::spawn(watch_auth(store.clone(), auth));
        if let Ok(mut slot) = store.inner.watcher.lock() {
            *slot = Some(watcher);
        }

        store
    }

    /// End the store's lifecycle: stop watching auth and clear state.
    pub fn teardown(&self) {
        if let Ok(mut slot) = self.inner.watcher.lock()
            && let Some(watcher) = slot.take()
        {
            watcher.abort();
        }
        self.reset();
    }

    // =========================================================================
    // Remote Operations
    // =========================================================================

    /// Fetch the cart from the backend, replacing the entire local
    /// collection on success. On failure the prior items stay untouched and
    /// only the loading phase is cleared - no partial merge.
    ///
    /// # Errors
    ///
    /// Returns a normalized [`CartError`]; never panics or leaks transport
    /// errors.
    pub async fn load(&self) -> Result<(), CartError> {
        let _slot = self.inner.op_slot.lock().await;
        self.set_phase(CartPhase::Loading);
        let result = self.inner.api.fetch_cart().await;
        self.apply(result, "Failed to load cart")
    }

    /// Ask the backend to insert or increment a line for `product_id`.
    ///
    /// The local collection is replaced wholesale from the response - never
    /// incremented locally - so stock limits and server-side price changes
    /// are reflected immediately.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message verbatim when present, and a
    /// generic fallback otherwise. State is unchanged on failure.
    pub async fn add_item(&self, product_id: &ProductId, quantity: u32) -> Result<(), CartError> {
        let _slot = self.inner.op_slot.lock().await;
        self.set_phase(CartPhase::Mutating);
        let result = self.inner.api.add_cart_item(product_id, quantity).await;
        self.apply(result, "Failed to add to cart")
    }

    /// Ask the backend to set a line to an exact quantity.
    ///
    /// Rejected locally, without issuing a request or touching state, when
    /// `quantity` is zero. (Negative quantities are unrepresentable.)
    ///
    /// # Errors
    ///
    /// `CartError::Invalid` for the local precondition, otherwise as
    /// [`add_item`](Self::add_item).
    pub async fn update_quantity(
        &self,
        item_id: &CartItemId,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::Invalid(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let _slot = self.inner.op_slot.lock().await;
        self.set_phase(CartPhase::Mutating);
        let result = self.inner.api.update_cart_item(item_id, quantity).await;
        self.apply(result, "Failed to update quantity")
    }

    /// Ask the backend to delete a line.
    ///
    /// # Errors
    ///
    /// As [`add_item`](Self::add_item).
    pub async fn remove_item(&self, item_id: &CartItemId) -> Result<(), CartError> {
        let _slot = self.inner.op_slot.lock().await;
        self.set_phase(CartPhase::Mutating);
        let result = self.inner.api.remove_cart_item(item_id).await;
        self.apply(result, "Failed to remove item")
    }

    // =========================================================================
    // Local Operations
    // =========================================================================

    /// Reset local state to an empty, ready cart without contacting the
    /// service. Used post-checkout, where order placement already
    /// invalidated the cart server-side.
    pub fn clear(&self) {
        if let Ok(mut state) = self.inner.state.lock() {
            state.items.clear();
            state.phase = CartPhase::Ready;
        }
    }

    /// Sum of `(discount_price ?? price) * quantity` over current local
    /// state. Pure; never triggers a fetch.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.inner.state.lock().map_or_else(
            |_| Decimal::ZERO,
            |state| {
                state
                    .items
                    .iter()
                    .map(|item| item.effective_price() * Decimal::from(item.quantity))
                    .sum()
            },
        )
    }

    /// Sum of quantities over current local state. Pure.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.inner.state.lock().map_or(0, |state| {
            state.items.iter().map(|item| item.quantity).sum()
        })
    }

    /// Snapshot of the current items, in server insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.inner
            .state
            .lock()
            .map_or_else(|_| Vec::new(), |state| state.items.clone())
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> CartPhase {
        self.inner.state.lock().map_or(CartPhase::Ready, |state| state.phase)
    }

    /// Whether the initial fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase() == CartPhase::Loading
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Back to `Uninitialized` with empty items (sign-out path).
    fn reset(&self) {
        if let Ok(mut state) = self.inner.state.lock() {
            state.items.clear();
            state.phase = CartPhase::Uninitialized;
        }
    }

    fn set_phase(&self, phase: CartPhase) {
        if let Ok(mut state) = self.inner.state.lock() {
            state.phase = phase;
        }
    }

    /// Settle a round trip: on success replace the whole collection, on
    /// failure leave items untouched. Either way the store is `Ready`.
    fn apply(
        &self,
        result: Result<CartSnapshot, ApiError>,
        fallback: &str,
    ) -> Result<(), CartError> {
        let mut state = match self.inner.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.phase = CartPhase::Ready;

        match result {
            Ok(snapshot) => {
                state.items = snapshot.items;
                Ok(())
            }
            Err(err) => Err(CartError::from_api(err, fallback)),
        }
    }
}

/// Watcher task body: translate auth transitions into cart lifecycle.
async fn watch_auth(store: CartStore, mut auth: watch::Receiver<AuthState>) {
    let mut signed_in = auth.borrow().is_authenticated();

    // A session already present at creation counts as a transition.
    if signed_in && let Err(err) = store.load().await {
        debug!(error = %err, "initial cart load failed");
    }

    while auth.changed().await.is_ok() {
        let now = auth.borrow().is_authenticated();
        if now == signed_in {
            // Profile or role updates are not lifecycle transitions.
            continue;
        }
        signed_in = now;

        if now {
            if let Err(err) = store.load().await {
                debug!(error = %err, "cart load after sign-in failed");
            }
        } else {
            store.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_against(url: &str) -> (CartStore, watch::Sender<AuthState>) {
        let config = ClientConfig::new(url).expect("valid url");
        let api = ApiClient::new(&config);
        let (tx, rx) = watch::channel(AuthState::default());
        (CartStore::create(api, rx), tx)
    }

    /// Unroutable endpoint: any issued request fails fast as a network error.
    fn offline_store() -> (CartStore, watch::Sender<AuthState>) {
        store_against("http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn test_starts_uninitialized_and_empty() {
        let (store, _tx) = offline_store();
        assert_eq!(store.phase(), CartPhase::Uninitialized);
        assert_eq!(store.count(), 0);
        assert_eq!(store.total(), Decimal::ZERO);
        assert!(store.items().is_empty());
        store.teardown();
    }

    #[tokio::test]
    async fn test_update_quantity_zero_rejected_locally() {
        let (store, _tx) = offline_store();

        let err = store
            .update_quantity(&CartItemId::new("line-1"), 0)
            .await
            .expect_err("zero quantity must be rejected");

        assert_eq!(
            err,
            CartError::Invalid("Quantity must be at least 1".to_string())
        );
        // No request was issued: the unroutable endpoint would have failed
        // differently, and state is untouched.
        assert_eq!(store.phase(), CartPhase::Uninitialized);
        assert_eq!(store.count(), 0);
        store.teardown();
    }

    #[tokio::test]
    async fn test_add_item_replaces_state_from_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cart"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": "x", "productId": "p1", "quantity": 1, "price": 20 }
                ]
            })))
            .mount(&server)
            .await;

        let (store, _tx) = store_against(&server.uri());
        store
            .add_item(&ProductId::new("p1"), 1)
            .await
            .expect("add succeeds");

        assert_eq!(store.count(), 1);
        assert_eq!(store.total(), Decimal::from(20));
        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, CartItemId::new("x"));
        assert_eq!(store.phase(), CartPhase::Ready);
        store.teardown();
    }

    #[tokio::test]
    async fn test_rejection_leaves_state_and_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cart"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": "a", "productId": "p1", "quantity": 2, "price": 10 }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/cart/a"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "message": "Insufficient stock" })),
            )
            .mount(&server)
            .await;

        let (store, _tx) = store_against(&server.uri());
        store
            .add_item(&ProductId::new("p1"), 2)
            .await
            .expect("add succeeds");

        let err = store
            .update_quantity(&CartItemId::new("a"), 5)
            .await
            .expect_err("update must be rejected");

        assert_eq!(err.message(), "Insufficient stock");
        assert_eq!(store.count(), 2);
        assert_eq!(store.total(), Decimal::from(20));
        store.teardown();
    }

    #[tokio::test]
    async fn test_clear_is_local_and_total_zeroes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cart"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": "a", "productId": "p1", "quantity": 2, "price": 10 },
                    { "id": "b", "productId": "p2", "quantity": 1, "price": 5 }
                ]
            })))
            .mount(&server)
            .await;

        let (store, _tx) = store_against(&server.uri());
        store
            .add_item(&ProductId::new("p1"), 2)
            .await
            .expect("add succeeds");
        assert_eq!(store.total(), Decimal::from(25));
        assert_eq!(store.count(), 3);

        store.clear();
        assert_eq!(store.count(), 0);
        assert_eq!(store.total(), Decimal::ZERO);
        assert_eq!(store.phase(), CartPhase::Ready);
        store.teardown();
    }

    #[tokio::test]
    async fn test_discount_price_wins_in_total() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cart"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {
                        "id": "a",
                        "productId": "p1",
                        "quantity": 3,
                        "price": 10,
                        "discountPrice": 7
                    }
                ]
            })))
            .mount(&server)
            .await;

        let (store, _tx) = store_against(&server.uri());
        store
            .add_item(&ProductId::new("p1"), 3)
            .await
            .expect("add succeeds");
        assert_eq!(store.total(), Decimal::from(21));
        store.teardown();
    }
}
