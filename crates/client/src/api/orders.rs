//! Order and coupon endpoints.

use rust_decimal::Decimal;
use tracing::instrument;

use super::ApiClient;
use super::types::{
    ApplyCouponRequest, CouponCheck, Order, PlaceOrderRequest, ShippingAddress,
};
use crate::error::ApiError;

impl ApiClient {
    /// List the signed-in user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/orders/my").await
    }

    /// Place an order for the current cart's contents.
    ///
    /// Order placement invalidates the cart server-side; after this call
    /// succeeds the caller resets its local cart state with
    /// [`crate::cart::CartStore::clear`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it
    /// (e.g., empty cart, expired coupon).
    #[instrument(skip(self, shipping_address))]
    pub async fn place_order(
        &self,
        shipping_address: ShippingAddress,
        coupon_code: Option<String>,
    ) -> Result<Order, ApiError> {
        let body = PlaceOrderRequest {
            shipping_address,
            coupon_code,
        };
        self.post("/orders", &body).await
    }

    /// Validate a coupon against an order amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the coupon is rejected.
    #[instrument(skip(self))]
    pub async fn apply_coupon(
        &self,
        code: &str,
        order_amount: Decimal,
    ) -> Result<CouponCheck, ApiError> {
        let body = ApplyCouponRequest {
            code: code.to_string(),
            order_amount,
        };
        self.post("/coupons/apply", &body).await
    }
}
