//! Cache types for catalog API responses.

use super::types::Product;

/// Cached value types. Cart and order responses are deliberately absent:
/// mutable state is never cached.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Categories(Vec<String>),
}
