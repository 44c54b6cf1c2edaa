//! Stateful session records: opaque identifiers with a TTL.
//!
//! The map is process-local. Restarts drop every session and a multi-instance
//! deployment would need a shared backing store; the payoff is that logout
//! revokes a token immediately, which the stateless codec cannot do.

use anyhow::{Context, Result};
use rand::{rngs::OsRng, RngCore};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown session token")]
    Unknown,
    #[error("session expired")]
    Expired,
}

/// In-memory session store with lazy expiry.
///
/// Expired entries are only purged when a validation attempt touches them;
/// abandoned sessions sit in the map until then or until the process exits.
pub struct SessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<String, Instant>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Create a session and return its opaque identifier.
    pub async fn create(&self) -> Result<String> {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .context("failed to generate session identifier")?;
        let token = hex::encode(bytes);

        self.sessions
            .lock()
            .await
            .insert(token.clone(), Instant::now());

        Ok(token)
    }

    /// Validate an identifier, deleting it if its TTL has passed.
    pub async fn validate(&self, token: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().await;
        let created_at = sessions.get(token).ok_or(SessionError::Unknown)?;

        if created_at.elapsed() > self.ttl {
            sessions.remove(token);
            return Err(SessionError::Expired);
        }

        Ok(())
    }

    /// Explicit logout; subsequent validation fails immediately.
    pub async fn delete(&self, token: &str) {
        self.sessions.lock().await.remove(token);
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
