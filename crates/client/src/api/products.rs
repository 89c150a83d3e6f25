//! Product catalog endpoints.
//!
//! Unfiltered reads are cached for 5 minutes; filtered listings always hit
//! the backend so search results never go stale.

use tracing::{debug, instrument};

use shopprime_core::ProductId;

use super::ApiClient;
use super::cache::CacheValue;
use super::types::{Product, ProductFilters, ProductList};
use crate::error::ApiError;

impl ApiClient {
    /// Get a product by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.get(&format!("/products/{id}")).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get a filtered product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, filters))]
    pub async fn get_products(&self, filters: &ProductFilters) -> Result<Vec<Product>, ApiError> {
        let cache_key = "products:default".to_string();

        // Check cache (only for the unfiltered default listing)
        if filters.is_default()
            && let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let list: ProductList = self
            .get_with_query("/products", &filters.to_query())
            .await?;

        if filters.is_default() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(list.products.clone()))
                .await;
        }

        Ok(list.products)
    }

    /// Get all product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<String>, ApiError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<String> = self.get("/products/categories").await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }
}
