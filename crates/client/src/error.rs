//! Error types for the ShopPrime client.
//!
//! Two layers: [`ApiError`] is what the raw REST client reports, and
//! [`CartError`] is the uniform failure the cart store hands to consumers.
//! Nothing in the store propagates a raw transport error past its boundary.

use thiserror::Error;

/// Errors that can occur when talking to the ShopPrime REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing of a successful response failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server responded non-2xx. `message` is the body's `message` field
    /// when the body carried one.
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Service {
        status: u16,
        message: Option<String>,
    },

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

impl ApiError {
    /// Whether the request never produced a server-side answer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Parse(_))
    }
}

/// Uniform failure result returned by every cart store operation.
///
/// The `Display` value of each variant is the human-readable reason the
/// consuming view is expected to surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The request never reached the server, timed out, or the response
    /// could not be read.
    #[error("{0}")]
    Network(String),

    /// The server rejected the operation. Carries the server's `message`
    /// verbatim, or the per-operation fallback when the body had none.
    #[error("{0}")]
    Rejected(String),

    /// A local precondition failed; no request was issued.
    #[error("{0}")]
    Invalid(String),
}

impl CartError {
    /// Normalize an [`ApiError`] using `fallback` when the server provided
    /// no message of its own.
    #[must_use]
    pub fn from_api(err: ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Service {
                message: Some(message),
                ..
            } => Self::Rejected(message),
            ApiError::Service { message: None, .. } | ApiError::RateLimited(_) => {
                Self::Rejected(fallback.to_string())
            }
            ApiError::Http(e) => Self::Network(e.to_string()),
            ApiError::Parse(e) => Self::Network(e.to_string()),
        }
    }

    /// The human-readable failure reason.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Network(m) | Self::Rejected(m) | Self::Invalid(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_surfaced_verbatim() {
        let err = ApiError::Service {
            status: 400,
            message: Some("Insufficient stock".to_string()),
        };
        let cart_err = CartError::from_api(err, "Failed to update quantity");
        assert_eq!(cart_err, CartError::Rejected("Insufficient stock".to_string()));
        assert_eq!(cart_err.message(), "Insufficient stock");
    }

    #[test]
    fn test_missing_message_uses_fallback() {
        let err = ApiError::Service {
            status: 500,
            message: None,
        };
        let cart_err = CartError::from_api(err, "Failed to add to cart");
        assert_eq!(cart_err.message(), "Failed to add to cart");
    }

    #[test]
    fn test_parse_error_is_network() {
        let parse_err =
            serde_json::from_str::<serde_json::Value>("{").expect_err("must fail");
        let cart_err = CartError::from_api(ApiError::Parse(parse_err), "fallback");
        assert!(matches!(cart_err, CartError::Network(_)));
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Service {
            status: 404,
            message: Some("Cart not found".to_string()),
        };
        assert_eq!(err.to_string(), "API error (404): Cart not found");

        let err = ApiError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
