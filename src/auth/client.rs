//! Admin UI gate as an explicit state machine.
//!
//! The UI renders from [`GateState`] alone: a spinner while `Checking`, the
//! credential form when `Unauthenticated`, the protected admin surface when
//! `Authenticated`. Transitions are a pure function over [`GateEvent`], so
//! the rendering logic is testable without any network; the [`AuthApi`]
//! trait is the only seam to the transport.
//!
//! Any transport failure counts as "not authenticated". The gate fails
//! closed.

use thiserror::Error;
use tracing::debug;

/// Generic message shown on a failed login; there is only one account, so
/// nothing more specific can be leaked anyway.
const LOGIN_FAILED_MESSAGE: &str = "Incorrect password.";
const TRANSPORT_FAILED_MESSAGE: &str = "Could not reach the server.";

#[derive(Debug, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// Transport seam for the gate: the session-check, login and logout calls.
pub trait AuthApi {
    /// `GET /auth`: is the current cookie a valid session?
    fn check_session(&self) -> impl std::future::Future<Output = Result<bool, TransportError>> + Send;
    /// `POST /auth {password}`: returns whether the login was accepted.
    fn login(
        &self,
        password: &str,
    ) -> impl std::future::Future<Output = Result<bool, TransportError>> + Send;
    /// `POST /auth {logout:true}`.
    fn logout(&self) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Checking,
    Authenticated,
    Unauthenticated { error: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    SessionValid,
    SessionInvalid,
    LoginAccepted,
    LoginRejected,
    TransportFailed,
    LoggedOut,
}

/// Pure transition function. Events that make no sense in the current state
/// leave it unchanged.
#[must_use]
pub fn step(state: &GateState, event: &GateEvent) -> GateState {
    match (state, event) {
        (GateState::Checking, GateEvent::SessionValid) => GateState::Authenticated,
        (GateState::Checking, GateEvent::SessionInvalid | GateEvent::TransportFailed) => {
            GateState::Unauthenticated { error: None }
        }
        (GateState::Unauthenticated { .. }, GateEvent::LoginAccepted) => GateState::Authenticated,
        (GateState::Unauthenticated { .. }, GateEvent::LoginRejected) => {
            GateState::Unauthenticated {
                error: Some(LOGIN_FAILED_MESSAGE.to_string()),
            }
        }
        (GateState::Unauthenticated { .. }, GateEvent::TransportFailed) => {
            GateState::Unauthenticated {
                error: Some(TRANSPORT_FAILED_MESSAGE.to_string()),
            }
        }
        (GateState::Authenticated, GateEvent::LoggedOut | GateEvent::SessionInvalid) => {
            GateState::Unauthenticated { error: None }
        }
        _ => state.clone(),
    }
}

/// Drives the state machine against a transport.
pub struct AdminGate<A: AuthApi> {
    api: A,
    state: GateState,
}

impl<A: AuthApi> AdminGate<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: GateState::Checking,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Initial session check when the admin surface loads.
    pub async fn mount(&mut self) {
        let event = match self.api.check_session().await {
            Ok(true) => GateEvent::SessionValid,
            Ok(false) => GateEvent::SessionInvalid,
            Err(err) => {
                debug!("session check failed: {err}");
                GateEvent::TransportFailed
            }
        };
        self.state = step(&self.state, &event);
    }

    /// Submit the credential form. The secret only lives for this call.
    pub async fn login(&mut self, password: &str) {
        let event = match self.api.login(password).await {
            Ok(true) => GateEvent::LoginAccepted,
            Ok(false) => GateEvent::LoginRejected,
            Err(err) => {
                debug!("login failed: {err}");
                GateEvent::TransportFailed
            }
        };
        self.state = step(&self.state, &event);
    }

    pub async fn logout(&mut self) {
        if let Err(err) = self.api.logout().await {
            debug!("logout failed: {err}");
        }
        // The cookie is cleared either way; render the form again.
        self.state = step(&self.state, &GateEvent::LoggedOut);
    }
}
