use crate::{AuthError, IdTokenClaims, Result as AuthErrorResult};

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

/// Issues HS256 ID tokens in place of an external OAuth provider.
///
/// Pairs with [`crate::IdTokenVerifier::with_hs256`] sharing the same
/// secret and audience.
pub struct IdTokenSigner {
    encoding_key: EncodingKey,
    audience: String,
}

impl IdTokenSigner {
    pub fn with_hs256(secret: &[u8], audience: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            audience: audience.into(),
        }
    }

    /// Claims for `sub` valid for `ttl_secs` from now
    pub fn claims(&self, sub: impl Into<String>, email: Option<String>, ttl_secs: i64) -> IdTokenClaims {
        let now = Utc::now().timestamp();
        IdTokenClaims {
            sub: sub.into(),
            aud: self.audience.clone(),
            exp: now + ttl_secs,
            iat: now,
            email,
            picture: None,
            nonce: None,
        }
    }

    #[track_caller]
    pub fn sign(&self, claims: &IdTokenClaims) -> AuthErrorResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            AuthError::JwtEncode {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}
