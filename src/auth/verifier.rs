//! Credential verification for the single admin secret.

use secrecy::{ExposeSecret, SecretString};

/// Constant-time string comparison
pub(crate) fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (a_byte, b_byte) in a.bytes().zip(b.bytes()) {
        result |= a_byte ^ b_byte;
    }

    result == 0
}

/// Check a submitted secret against the configured one.
///
/// An empty configured secret never matches anything: a misconfigured process
/// must fail closed rather than accept every login.
#[must_use]
pub fn verify_secret(candidate: &str, configured: &SecretString) -> bool {
    let configured = configured.expose_secret();
    !configured.is_empty() && constant_time_eq(candidate, configured)
}
