//! Nonce handling for Sign in with Apple.
//!
//! The authorization request carries the SHA-256 of a random nonce; the
//! raw nonce goes to the backend with the returned identity token so the
//! backend can match the two.

use crate::AppleSignInResult;

use rand::Rng;
use sha2::{Digest, Sha256};

pub const DEFAULT_NONCE_LENGTH: usize = 32;

const NONCE_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVXYZabcdefghijklmnopqrstuvwxyz-._";

/// Random nonce of `length` characters from the nonce charset.
pub fn random_nonce(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| NONCE_CHARSET[rng.random_range(0..NONCE_CHARSET.len())] as char)
        .collect()
}

/// Lowercase hex SHA-256 digest of `input`.
pub fn sha256_hex(input: &str) -> String {
    Sha256::digest(input.as_bytes())
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// One pending Sign in with Apple authorization.
#[derive(Debug, Clone)]
pub struct AppleSignInRequest {
    raw_nonce: String,
    hashed_nonce: String,
}

impl AppleSignInRequest {
    pub fn new() -> Self {
        Self::with_nonce_length(DEFAULT_NONCE_LENGTH)
    }

    pub fn with_nonce_length(length: usize) -> Self {
        Self::from_raw_nonce(random_nonce(length))
    }

    pub fn from_raw_nonce(raw_nonce: String) -> Self {
        let hashed_nonce = sha256_hex(&raw_nonce);
        Self {
            raw_nonce,
            hashed_nonce,
        }
    }

    /// Value for the authorization request's `nonce` field
    pub fn hashed_nonce(&self) -> &str {
        &self.hashed_nonce
    }

    pub fn raw_nonce(&self) -> &str {
        &self.raw_nonce
    }

    /// Pairs the identity token Apple returned with the raw nonce.
    pub fn complete(
        self,
        identity_token: impl Into<String>,
        name: Option<String>,
        email: Option<String>,
    ) -> AppleSignInResult {
        AppleSignInResult {
            token: identity_token.into(),
            nonce: self.raw_nonce,
            name,
            email,
        }
    }
}

impl Default for AppleSignInRequest {
    fn default() -> Self {
        Self::new()
    }
}
