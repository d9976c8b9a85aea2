use crate::{AuthError, IdTokenClaims, Result as AuthErrorResult, sha256_hex};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// Verifies OAuth ID tokens presented with a sign-in or link request.
pub struct IdTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: Algorithm,
}

impl IdTokenVerifier {
    /// HS256 (shared secret) verifier for tokens issued to `audience`
    pub fn with_hs256(secret: &[u8], audience: &str, leeway_secs: u64) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Self::validation(Algorithm::HS256, audience, leeway_secs),
            algorithm: Algorithm::HS256,
        }
    }

    /// RS256 verifier from a PEM encoded public key
    #[track_caller]
    pub fn with_rs256(
        public_key_pem: &str,
        audience: &str,
        leeway_secs: u64,
    ) -> AuthErrorResult<Self> {
        let decoding_key =
            DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
                AuthError::InvalidToken {
                    message: format!("Invalid RSA public key: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        Ok(Self {
            decoding_key,
            validation: Self::validation(Algorithm::RS256, audience, leeway_secs),
            algorithm: Algorithm::RS256,
        })
    }

    fn validation(algorithm: Algorithm, audience: &str, leeway_secs: u64) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = leeway_secs;
        validation.set_audience(&[audience]);
        validation
    }

    /// Verify signature, expiry and audience, then the claims themselves
    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthErrorResult<IdTokenClaims> {
        let token_data = decode::<IdTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }

    /// Verify a token whose `nonce` claim must be the SHA-256 of `raw_nonce`
    #[track_caller]
    pub fn verify_with_nonce(
        &self,
        token: &str,
        raw_nonce: &str,
    ) -> AuthErrorResult<IdTokenClaims> {
        let claims = self.verify(token)?;

        match claims.nonce.as_deref() {
            Some(hashed) if hashed == sha256_hex(raw_nonce) => Ok(claims),
            Some(_) => Err(AuthError::invalid_token("nonce mismatch")),
            None => Err(AuthError::invalid_token("token carries no nonce")),
        }
    }

    /// Get the algorithm being used (for logging/debugging)
    pub fn algorithm(&self) -> &str {
        match self.algorithm {
            Algorithm::HS256 => "HS256",
            Algorithm::RS256 => "RS256",
            _ => "unknown",
        }
    }
}
