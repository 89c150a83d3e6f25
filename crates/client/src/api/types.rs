//! Wire types for the ShopPrime REST API.
//!
//! The backend speaks camelCase JSON; every type here renames accordingly.
//! Monetary amounts are [`Decimal`] end to end - the server may send them as
//! bare numbers or strings, both of which `rust_decimal` accepts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopprime_core::{
    CartItemId, CouponId, DiscountType, OrderId, OrderStatus, PaymentStatus, ProductId, UserId,
    UserRole,
};

// =============================================================================
// Cart
// =============================================================================

/// One product-quantity line within the cart.
///
/// The product is referenced by id rather than embedded so a stale snapshot
/// never shadows current catalog data. `price`/`discount_price` are display
/// snapshots only; authoritative pricing is recomputed server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Stable line identifier, unique per line across reloads.
    pub id: CartItemId,
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Quantity, always >= 1 in server responses.
    pub quantity: u32,
    /// Unit price snapshot.
    pub price: Decimal,
    /// Discounted unit price snapshot, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,
}

impl CartItem {
    /// The unit price used for display totals: discount price when present.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.discount_price.unwrap_or(self.price)
    }
}

/// Full cart state as returned by every cart endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Lines in server insertion order.
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// Body for `POST /cart`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body for `PUT /cart/{itemId}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCartItemRequest {
    pub quantity: u32,
}

// =============================================================================
// Products
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand: String,
    pub category: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
    pub stock: u32,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub is_featured: bool,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Response envelope for `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceLowToHigh,
    PriceHighToLow,
}

impl ProductSort {
    /// Query-string value understood by the backend.
    #[must_use]
    pub const fn as_query_value(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceLowToHigh => "price_low",
            Self::PriceHighToLow => "price_high",
        }
    }
}

/// Filters for product listings. All fields optional; `Default` lists
/// everything, newest first.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: ProductSort,
}

impl ProductFilters {
    /// Whether this is the unfiltered default listing (the only cacheable one).
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.sort == ProductSort::Newest
    }

    /// Render as query-string pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        if self.sort != ProductSort::Newest {
            pairs.push(("sort", self.sort.as_query_value().to_string()));
        }
        pairs
    }
}

// =============================================================================
// Users & Auth
// =============================================================================

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response from `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Body for `PUT /auth/profile`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// =============================================================================
// Orders
// =============================================================================

/// Shipping address attached to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub label: String,
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
}

/// One line of a placed order. Unlike cart lines, the product name is
/// denormalized in so order history survives catalog deletions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
}

/// Body for `POST /orders`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub shipping_address: ShippingAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

/// Response envelope for order listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderList {
    #[serde(default)]
    pub orders: Vec<Order>,
}

// =============================================================================
// Coupons
// =============================================================================

/// A discount coupon (admin view).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order_value: Option<Decimal>,
    pub expiry_date: DateTime<Utc>,
}

/// Body for `POST /coupons/apply`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCouponRequest {
    pub code: String,
    pub order_amount: Decimal,
}

/// Response from `POST /coupons/apply`.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponCheck {
    pub valid: bool,
    #[serde(default)]
    pub discount: Decimal,
}

// =============================================================================
// Admin
// =============================================================================

/// Aggregate figures for the admin dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: Decimal,
    pub total_orders: u64,
    pub total_users: u64,
    pub total_products: u64,
}

/// Response from `GET /admin/dashboard`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_orders: Vec<Order>,
}

/// Body for admin product create/update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,
    pub images: Vec<String>,
    pub stock: u32,
    pub is_featured: bool,
}

/// Body for `PUT /admin/orders/{id}/status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub order_status: OrderStatus,
}

/// Body for `PUT /admin/users/{id}/block`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockUserRequest {
    pub is_blocked: bool,
}

/// Body for `POST /admin/coupons`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponInput {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_order_value: Option<Decimal>,
    pub expiry_date: DateTime<Utc>,
}
