use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_MIN_PASSWORD_LENGTH, DEFAULT_NONCE_LENGTH,
    DEFAULT_TOKEN_LEEWAY_SECS, MAX_NONCE_LENGTH, MIN_NONCE_LENGTH,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Passwords shorter than this are rejected as weak
    pub min_password_length: usize,
    /// Length of the raw nonce generated for Sign in with Apple
    pub nonce_length: usize,
    /// Clock skew tolerated when verifying OAuth ID tokens
    pub token_leeway_secs: u64,
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.min_password_length == 0 {
            return Err(ConfigError::auth("auth.min_password_length must be at least 1"));
        }

        if !(MIN_NONCE_LENGTH..=MAX_NONCE_LENGTH).contains(&self.nonce_length) {
            return Err(ConfigError::auth(format!(
                "auth.nonce_length must be between {MIN_NONCE_LENGTH} and {MAX_NONCE_LENGTH}, got {}",
                self.nonce_length
            )));
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            nonce_length: DEFAULT_NONCE_LENGTH,
            token_leeway_secs: DEFAULT_TOKEN_LEEWAY_SECS,
        }
    }
}
