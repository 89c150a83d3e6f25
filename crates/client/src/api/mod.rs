//! ShopPrime REST API client.
//!
//! One [`ApiClient`] instance is shared process-wide (cheap `Arc` clone).
//! Catalog reads are cached via `moka` (5-minute TTL); cart, order, and
//! admin endpoints are never cached - they are mutable state.

mod cache;
pub mod types;

mod admin;
mod auth;
mod cart;
mod orders;
mod products;

use std::sync::RwLock;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::ApiError;

use cache::CacheValue;

/// Error body shape used by every non-2xx backend response.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the ShopPrime REST API.
///
/// Cloning is cheap and every clone shares the same connection pool,
/// bearer token, and cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<SecretString>>,
    cache: Cache<String, CacheValue>,
}

impl ApiClient {
    /// Create a new API client from configuration.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
                token: RwLock::new(config.api_token.clone()),
                cache,
            }),
        }
    }

    /// Install the bearer token used for authenticated requests.
    pub fn set_token(&self, token: &str) {
        if let Ok(mut slot) = self.inner.token.write() {
            *slot = Some(SecretString::from(token.to_string()));
        }
    }

    /// Drop the bearer token (sign-out).
    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.inner.token.write() {
            *slot = None;
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self
            .inner
            .token
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|t| t.expose_secret().to_string()));

        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // =========================================================================
    // Request Helpers
    // =========================================================================

    /// Send a request and parse the JSON response.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&response_text)
                .ok()
                .map(|body| body.message);
            tracing::debug!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "API returned non-success status"
            );
            return Err(ApiError::Service {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse API response"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a request where the success body is irrelevant.
    async fn send_expect_ok(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let response_text = response.text().await?;
        let message = serde_json::from_str::<ErrorBody>(&response_text)
            .ok()
            .map(|body| body.message);
        Err(ApiError::Service {
            status: status.as_u16(),
            message,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.inner.client.get(self.url(path))).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        self.send(self.inner.client.get(self.url(path)).query(query))
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.inner.client.post(self.url(path)).json(body))
            .await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.inner.client.put(self.url(path)).json(body))
            .await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.inner.client.delete(self.url(path))).await
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, id: &shopprime_core::ProductId) {
        self.inner.cache.invalidate(&format!("product:{id}")).await;
    }

    /// Invalidate all cached catalog data.
    pub async fn invalidate_catalog(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
