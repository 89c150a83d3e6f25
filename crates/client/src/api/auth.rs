//! Authentication and profile endpoints.
//!
//! Token issuance lives entirely server-side; this module only exchanges
//! credentials for a token and does not install it - that wiring belongs to
//! [`crate::auth::AuthBroker`].

use tracing::instrument;

use super::ApiClient;
use super::types::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, User,
};
use crate::error::ApiError;

impl ApiClient {
    /// Exchange credentials for a bearer token and user record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/auth/login", &body).await
    }

    /// Create a new customer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the account already exists.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/auth/register", &body).await
    }

    /// Fetch the signed-in user's record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is invalid.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User, ApiError> {
        self.get("/auth/me").await
    }

    /// Update the signed-in user's display name and phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        name: &str,
        phone: Option<&str>,
    ) -> Result<User, ApiError> {
        let body = UpdateProfileRequest {
            name: name.to_string(),
            phone: phone.map(String::from),
        };
        self.put("/auth/profile", &body).await
    }
}
