//! Admin back-office endpoints.
//!
//! Pure CRUD over the same REST contract; the backend enforces the admin
//! role. Product writes invalidate the catalog cache so customer-facing
//! reads pick up changes immediately.

use tracing::instrument;

use shopprime_core::{CouponId, OrderId, OrderStatus, ProductId, UserId};

use super::ApiClient;
use super::types::{
    BlockUserRequest, Coupon, CouponInput, Dashboard, Order, OrderList, Product, ProductInput,
    UpdateOrderStatusRequest, User,
};
use crate::error::ApiError;

impl ApiClient {
    /// Fetch dashboard statistics and recent orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the user is not an admin.
    #[instrument(skip(self))]
    pub async fn admin_dashboard(&self) -> Result<Dashboard, ApiError> {
        self.get("/admin/dashboard").await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List all products, including out-of-stock and unpublished ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn admin_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("/admin/products").await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the input is rejected.
    #[instrument(skip(self, input))]
    pub async fn admin_create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        let product: Product = self.post("/admin/products", input).await?;
        self.invalidate_catalog().await;
        Ok(product)
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the input is rejected.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn admin_update_product(
        &self,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        let product: Product = self.put(&format!("/admin/products/{id}"), input).await?;
        self.invalidate_product(id).await;
        Ok(product)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn admin_delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.send_expect_ok(
            self.inner
                .client
                .delete(self.url(&format!("/admin/products/{id}"))),
        )
        .await?;
        self.invalidate_catalog().await;
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List all orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn admin_orders(&self) -> Result<Vec<Order>, ApiError> {
        let list: OrderList = self.get("/admin/orders").await?;
        Ok(list.orders)
    }

    /// Set an order's lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the transition is rejected.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn admin_update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let body = UpdateOrderStatusRequest {
            order_status: status,
        };
        self.put(&format!("/admin/orders/{id}/status"), &body).await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// List all user accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn admin_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/admin/users").await
    }

    /// Block or unblock a user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn admin_set_user_blocked(
        &self,
        id: &UserId,
        blocked: bool,
    ) -> Result<User, ApiError> {
        let body = BlockUserRequest {
            is_blocked: blocked,
        };
        self.put(&format!("/admin/users/{id}/block"), &body).await
    }

    // =========================================================================
    // Coupons
    // =========================================================================

    /// List all coupons.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn admin_coupons(&self) -> Result<Vec<Coupon>, ApiError> {
        self.get("/admin/coupons").await
    }

    /// Create a coupon.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the input is rejected.
    #[instrument(skip(self, input))]
    pub async fn admin_create_coupon(&self, input: &CouponInput) -> Result<Coupon, ApiError> {
        self.post("/admin/coupons", input).await
    }

    /// Delete a coupon.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(coupon_id = %id))]
    pub async fn admin_delete_coupon(&self, id: &CouponId) -> Result<(), ApiError> {
        self.send_expect_ok(
            self.inner
                .client
                .delete(self.url(&format!("/admin/coupons/{id}"))),
        )
        .await
    }
}
