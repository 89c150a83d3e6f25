//! Authentication session state.
//!
//! [`AuthBroker`] owns the signed-in/signed-out state for the process and
//! publishes every transition over a `tokio::sync::watch` channel. Anything
//! that cares about authentication - the cart store above all - subscribes
//! at construction time. There are no hidden reactive effects: the cart's
//! dependency on auth is a wire you can see in `main`.

use tokio::sync::watch;

use shopprime_core::{UserId, UserRole};

use crate::api::ApiClient;
use crate::api::types::User;
use crate::error::ApiError;

/// Identity attached to a signed-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: UserId,
    pub name: String,
    pub role: UserRole,
}

impl From<&User> for AuthSession {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Current authentication state. `Default` is signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    session: Option<AuthSession>,
}

impl AuthState {
    /// Whether a valid session is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The session, when signed in.
    #[must_use]
    pub const fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }
}

/// Publisher of authentication transitions.
///
/// Signing in installs the bearer token on the shared [`ApiClient`] before
/// the new state is published, so subscribers reacting to the transition
/// (the cart store's initial `load`) always make authenticated calls.
pub struct AuthBroker {
    api: ApiClient,
    tx: watch::Sender<AuthState>,
}

impl AuthBroker {
    /// Create a broker in the signed-out state.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let (tx, _rx) = watch::channel(AuthState::default());
        Self { api, tx }
    }

    /// Subscribe to authentication transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn current(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected;
    /// the state stays signed out.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let response = self.api.login(email, password).await?;
        self.install(&response.token, &response.user);
        Ok(response.user)
    }

    /// Register a new account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or registration is rejected.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, ApiError> {
        let response = self.api.register(name, email, password).await?;
        self.install(&response.token, &response.user);
        Ok(response.user)
    }

    /// Resume a session from a token already configured on the client
    /// (e.g., `SHOPPRIME_API_TOKEN`). Validates it against `/auth/me`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing, expired, or rejected;
    /// the state stays signed out.
    pub async fn resume(&self) -> Result<User, ApiError> {
        let user = self.api.me().await?;
        self.tx.send_replace(AuthState {
            session: Some(AuthSession::from(&user)),
        });
        Ok(user)
    }

    /// Sign out: drop the token and publish the signed-out state.
    ///
    /// Purely local - token revocation is the server's concern.
    pub fn sign_out(&self) {
        self.api.clear_token();
        self.tx.send_replace(AuthState::default());
    }

    fn install(&self, token: &str, user: &User) {
        self.api.set_token(token);
        self.tx.send_replace(AuthState {
            session: Some(AuthSession::from(user)),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn test_api() -> ApiClient {
        let config = ClientConfig::new("http://127.0.0.1:9").expect("valid url");
        ApiClient::new(&config)
    }

    #[tokio::test]
    async fn test_starts_signed_out() {
        let broker = AuthBroker::new(test_api());
        assert!(!broker.current().is_authenticated());
        assert!(broker.current().session().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_publishes_transition() {
        let broker = AuthBroker::new(test_api());
        let rx = broker.subscribe();

        broker.sign_out();
        assert!(!rx.borrow().is_authenticated());
    }
}
