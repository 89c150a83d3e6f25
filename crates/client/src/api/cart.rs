//! Cart endpoints.
//!
//! These methods are the raw wire calls behind [`crate::cart::CartStore`];
//! consumers should go through the store, which owns serialization and
//! state replacement. Every response is the full cart state.

use tracing::instrument;

use shopprime_core::{CartItemId, ProductId};

use super::ApiClient;
use super::types::{AddCartItemRequest, CartSnapshot, UpdateCartItemRequest};
use crate::error::ApiError;

impl ApiClient {
    /// Fetch the current cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn fetch_cart(&self) -> Result<CartSnapshot, ApiError> {
        self.get("/cart").await
    }

    /// Insert or increment a line for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it
    /// (e.g., insufficient stock).
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_cart_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, ApiError> {
        let body = AddCartItemRequest {
            product_id: product_id.clone(),
            quantity,
        };
        self.post("/cart", &body).await
    }

    /// Set the exact quantity of an existing line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn update_cart_item(
        &self,
        item_id: &CartItemId,
        quantity: u32,
    ) -> Result<CartSnapshot, ApiError> {
        let body = UpdateCartItemRequest { quantity };
        self.put(&format!("/cart/{item_id}"), &body).await
    }

    /// Delete a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_cart_item(&self, item_id: &CartItemId) -> Result<CartSnapshot, ApiError> {
        self.delete(&format!("/cart/{item_id}")).await
    }
}
