//! Process-wide auth state: the admin secret, configuration, and the chosen
//! session backend.
//!
//! The two backends are mutually exclusive design points. Exactly one is
//! selected at startup and the gate never mixes their behaviors.

use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;

use super::codec::TokenCodec;
use super::store::{SessionError, SessionStore};

const DEFAULT_SESSION_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Signed `nonce.mac` tokens, no server-side state, non-revocable.
    Stateless,
    /// Opaque identifiers in an in-memory map with a TTL, revocable.
    Stateful,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    backend: BackendKind,
    session_ttl_seconds: u64,
    cookie_secure: bool,
}

impl AuthConfig {
    #[must_use]
    pub fn new(backend: BackendKind) -> Self {
        Self {
            backend,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            cookie_secure: true,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: u64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    #[must_use]
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }
}

/// Why a presented token failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateError {
    Invalid,
    Expired,
}

/// The selected session backend.
pub enum Sessions {
    Stateless(TokenCodec),
    Stateful(SessionStore),
}

impl Sessions {
    /// Issue a fresh session token after a successful login.
    pub async fn issue(&self) -> Result<String> {
        match self {
            Self::Stateless(codec) => codec.issue(),
            Self::Stateful(store) => store.create().await,
        }
    }

    /// Validate a presented token.
    pub async fn validate(&self, token: &str) -> Result<(), ValidateError> {
        match self {
            Self::Stateless(codec) => codec.validate(token).map_err(|_| ValidateError::Invalid),
            Self::Stateful(store) => store.validate(token).await.map_err(|err| match err {
                SessionError::Unknown => ValidateError::Invalid,
                SessionError::Expired => ValidateError::Expired,
            }),
        }
    }

    /// Revoke a token on logout.
    ///
    /// The stateless backend has nothing to revoke: the cookie is cleared but
    /// the token string stays valid until the secret rotates.
    pub async fn revoke(&self, token: &str) {
        match self {
            Self::Stateless(_) => {
                debug!("stateless backend: logout clears the cookie only");
            }
            Self::Stateful(store) => store.delete(token).await,
        }
    }
}

pub struct AuthState {
    secret: SecretString,
    config: AuthConfig,
    sessions: Sessions,
}

impl AuthState {
    #[must_use]
    pub fn new(secret: SecretString, config: AuthConfig) -> Self {
        let ttl = Duration::from_secs(config.session_ttl_seconds());
        let sessions = match config.backend() {
            BackendKind::Stateless => Sessions::Stateless(TokenCodec::new(secret.clone())),
            BackendKind::Stateful => Sessions::Stateful(SessionStore::new(ttl)),
        };

        Self {
            secret,
            config,
            sessions,
        }
    }

    #[must_use]
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }

    /// True when the process has no usable admin secret. The gate surfaces
    /// this as a 500 on every auth attempt instead of failing open.
    #[must_use]
    pub fn misconfigured(&self) -> bool {
        self.secret.expose_secret().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(backend: BackendKind) -> AuthState {
        AuthState::new(
            SecretString::from("sesame".to_string()),
            AuthConfig::new(backend),
        )
    }

    #[tokio::test]
    async fn stateless_issue_then_validate() {
        let state = state(BackendKind::Stateless);
        let token = state.sessions().issue().await.unwrap();
        assert_eq!(state.sessions().validate(&token).await, Ok(()));
    }

    #[tokio::test]
    async fn stateful_issue_then_validate() {
        let state = state(BackendKind::Stateful);
        let token = state.sessions().issue().await.unwrap();
        assert_eq!(state.sessions().validate(&token).await, Ok(()));
    }

    #[tokio::test]
    async fn stateful_revoke_invalidates() {
        let state = state(BackendKind::Stateful);
        let token = state.sessions().issue().await.unwrap();
        state.sessions().revoke(&token).await;
        assert_eq!(
            state.sessions().validate(&token).await,
            Err(ValidateError::Invalid)
        );
    }

    // Known limitation of the stateless design, not a bug: revocation is a
    // no-op and the token string stays valid after logout.
    #[tokio::test]
    async fn stateless_revoke_is_a_noop() {
        let state = state(BackendKind::Stateless);
        let token = state.sessions().issue().await.unwrap();
        state.sessions().revoke(&token).await;
        assert_eq!(state.sessions().validate(&token).await, Ok(()));
    }

    #[test]
    fn empty_secret_is_misconfigured() {
        let state = AuthState::new(
            SecretString::from(String::new()),
            AuthConfig::new(BackendKind::Stateless),
        );
        assert!(state.misconfigured());
        assert!(!AuthState::new(
            SecretString::from("sesame".to_string()),
            AuthConfig::new(BackendKind::Stateless),
        )
        .misconfigured());
    }
}
