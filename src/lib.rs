//! # Wordhoard (personal lexicon service)
//!
//! `wordhoard` serves a personal word collection: a public read-only index and
//! an admin surface for adding, editing and deleting entries. The interesting
//! part of the crate is the single-tenant session and request-authorization
//! layer in [`auth`]; everything else is ordinary handler plumbing.
//!
//! ## Trust model
//!
//! There is exactly one credential (a shared administrator secret) and exactly
//! one trust level. Every mutating word endpoint asks the auth gate "is this
//! request authorized?" and returns the gate's deny response verbatim when it
//! is not.
//!
//! ## Session backends
//!
//! Two mutually exclusive session designs are provided and one is selected at
//! startup:
//!
//! - **stateless**: tokens are `nonce.mac` pairs signed with a key derived
//!   from the admin secret. No server-side state, survives restarts and scales
//!   horizontally, but logout cannot revoke an issued token; only rotating the
//!   secret can.
//! - **stateful**: tokens are opaque random identifiers held in an in-memory
//!   map with a TTL. Logout revokes immediately, at the cost of per-process
//!   state that disappears on restart.

pub mod api;
pub mod auth;
pub mod cli;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
