//! Stateless session tokens: random nonce plus a keyed MAC.
//!
//! A token is `nonce_hex.mac_hex` where the MAC is HMAC-SHA256 over the hex
//! nonce, keyed with the admin secret plus a fixed domain-separation suffix.
//! Validation recomputes the MAC and compares in constant time, so no
//! server-side state is needed and any number of instances can validate
//! tokens issued by any other.
//!
//! Trade-off: there is no expiry and no revocation. Logout only clears the
//! cookie; a captured token stays valid until the admin secret is rotated.

use anyhow::{Context, Result};
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Keeps session MACs distinct from any other use of the same secret.
const KEY_DOMAIN: &str = "/wordhoard/session/v1";

const NONCE_BYTES: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("token signature mismatch")]
    BadSignature,
}

/// Stateless token issuer/validator keyed from the admin secret.
pub struct TokenCodec {
    secret: SecretString,
}

impl TokenCodec {
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn keyed_mac(&self) -> Result<HmacSha256, TokenError> {
        let key = format!("{}{KEY_DOMAIN}", self.secret.expose_secret());
        HmacSha256::new_from_slice(key.as_bytes()).map_err(|_| TokenError::BadSignature)
    }

    /// Mint a new token. Two issuances never collide: the nonce is 256 random
    /// bits from the OS.
    pub fn issue(&self) -> Result<String> {
        let mut bytes = [0u8; NONCE_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .context("failed to generate session nonce")?;
        let nonce = hex::encode(bytes);

        let mut mac = self
            .keyed_mac()
            .map_err(|_| anyhow::anyhow!("failed to key session MAC"))?;
        mac.update(nonce.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!("{nonce}.{signature}"))
    }

    /// Validate a presented token.
    ///
    /// The token must be exactly `nonce.signature_hex`; the recomputed MAC is
    /// compared against the presented one in constant time.
    pub fn validate(&self, token: &str) -> Result<(), TokenError> {
        let parts: Vec<&str> = token.split('.').collect();
        let [nonce, signature] = parts.as_slice() else {
            return Err(TokenError::Malformed);
        };
        if nonce.is_empty() || signature.is_empty() {
            return Err(TokenError::Malformed);
        }

        let presented = hex::decode(*signature).map_err(|_| TokenError::Malformed)?;

        let mut mac = self.keyed_mac()?;
        mac.update(nonce.as_bytes());
        mac.verify_slice(&presented)
            .map_err(|_| TokenError::BadSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn codec(secret: &str) -> TokenCodec {
        TokenCodec::new(SecretString::from(secret.to_string()))
    }

    #[test]
    fn issued_token_validates() {
        let codec = codec("sesame");
        let token = codec.issue().unwrap();
        assert_eq!(codec.validate(&token), Ok(()));
    }

    #[test]
    fn two_issuances_differ() {
        let codec = codec("sesame");
        assert_ne!(codec.issue().unwrap(), codec.issue().unwrap());
    }

    #[test]
    fn token_shape_is_nonce_dot_signature() {
        let token = codec("sesame").issue().unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 2);
        // 32-byte nonce and 32-byte HMAC-SHA256 tag, both hex
        assert_eq!(parts[0].len(), 64);
        assert_eq!(parts[1].len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() || c == '.'));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = codec("sesame").issue().unwrap();
        assert_eq!(
            codec("not-sesame").validate(&token),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let codec = codec("sesame");
        for token in ["", "garbage", "a.b.c", ".", "deadbeef.", ".deadbeef"] {
            assert_eq!(codec.validate(token), Err(TokenError::Malformed), "{token}");
        }
    }

    #[test]
    fn any_single_character_flip_invalidates() {
        let codec = codec("sesame");
        let token = codec.issue().unwrap();

        let mut rng = rand::thread_rng();
        for _ in 0..32 {
            let mut corrupted: Vec<u8> = token.as_bytes().to_vec();
            let position = rng.gen_range(0..corrupted.len());
            if corrupted[position] == b'.' {
                continue;
            }
            // Replace with a different hex digit so the token stays well-formed.
            let replacement = if corrupted[position] == b'0' { b'1' } else { b'0' };
            corrupted[position] = replacement;
            let corrupted = String::from_utf8(corrupted).unwrap();
            assert!(
                codec.validate(&corrupted).is_err(),
                "flip at {position} was accepted"
            );
        }
    }
}
