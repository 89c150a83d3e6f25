//! CLI command implementations.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;

use rust_decimal::Decimal;
use shopprime_client::api::ApiClient;
use shopprime_client::api::types::User;
use shopprime_client::auth::AuthBroker;
use shopprime_client::config::ClientConfig;
use shopprime_core::{CurrencyCode, Price};
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] shopprime_client::config::ConfigError),

    #[error("{0}")]
    Api(#[from] shopprime_client::error::ApiError),

    #[error("{0}")]
    Cart(#[from] shopprime_client::error::CartError),

    #[error("Not signed in. Run `shopprime login` and export SHOPPRIME_API_TOKEN.")]
    NotSignedIn,

    #[error("{0}")]
    InvalidArgument(String),
}

/// Shared command context: configuration, API client, auth broker.
pub struct Context {
    pub api: ApiClient,
    pub auth: AuthBroker,
}

impl Context {
    /// Build the context from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or invalid.
    pub fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        let api = ApiClient::new(&config);
        let auth = AuthBroker::new(api.clone());
        Ok(Self { api, auth })
    }

    /// Resume the session from `SHOPPRIME_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NotSignedIn`] if the token is absent or rejected.
    pub async fn require_session(&self) -> Result<User, CliError> {
        self.auth.resume().await.map_err(|_| CliError::NotSignedIn)
    }
}

/// Format a bare decimal amount as a display price.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    Price::new(amount, CurrencyCode::USD).display()
}
