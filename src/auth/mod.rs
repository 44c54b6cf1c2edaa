//! Single-tenant session and request-authorization layer.
//!
//! Everything that gates the admin surface lives here:
//!
//! - [`verifier`]: constant-time check of a submitted secret against the
//!   configured one.
//! - [`codec`]: stateless `nonce.mac` session tokens, unforgeable without
//!   the admin secret and valid for as long as that secret lives.
//! - [`store`]: stateful alternative: opaque identifiers held in memory with
//!   a TTL, revocable on logout.
//! - [`state`]: process-wide auth configuration and the backend selection.
//! - [`gate`]: the per-request server gate: cookie extraction, token
//!   validation, and the Origin/Host CSRF check for mutating methods.
//! - [`client`]: the admin UI gate as an explicit state machine, decoupled
//!   from the transport so transitions are testable offline.
//!
//! Handlers never see raw tokens; they only see the gate's
//! [`Decision`](gate::Decision) or its terminal deny response.

pub mod client;
pub mod codec;
pub mod gate;
pub mod state;
pub mod store;
pub mod verifier;
