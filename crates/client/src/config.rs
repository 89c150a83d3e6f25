//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPPRIME_API_URL` - Base URL of the ShopPrime REST API
//!   (e.g., `https://api.shopprime.example/api`)
//!
//! ## Optional
//! - `SHOPPRIME_API_TOKEN` - Bearer token from a previous sign-in
//! - `SHOPPRIME_API_TIMEOUT_SECS` - Request timeout (default: 30)

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
///
/// Implements `Debug` manually to redact the bearer token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: Url,
    /// Bearer token for authenticated requests, if already signed in.
    pub api_token: Option<SecretString>,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_required_env("SHOPPRIME_API_URL")?)?;
        let api_token = get_optional_env("SHOPPRIME_API_TOKEN").map(SecretString::from);
        let timeout_secs = get_env_or_default("SHOPPRIME_API_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPPRIME_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a configuration from explicit values (used by tests and the CLI).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_url` is not a valid absolute URL.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            api_token: None,
            timeout: Duration::from_secs(30),
        })
    }

    /// Expose the configured token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.api_token
            .as_ref()
            .map(|t| t.expose_secret().to_string())
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim_end_matches('/'))
        .map_err(|e| ConfigError::InvalidEnvVar("SHOPPRIME_API_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "SHOPPRIME_API_URL".to_string(),
            format!("unsupported scheme: {}", url.scheme()),
        ));
    }

    Ok(url)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_strips_trailing_slash() {
        let url = parse_api_url("https://api.example.com/api/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api");
    }

    #[test]
    fn test_parse_api_url_rejects_bad_scheme() {
        let result = parse_api_url("ftp://api.example.com");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_parse_api_url_rejects_garbage() {
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig {
            api_url: Url::parse("https://api.example.com").unwrap(),
            api_token: Some(SecretString::from("super-secret-token")),
            timeout: Duration::from_secs(30),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-token"));
    }
}
