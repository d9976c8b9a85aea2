//! Credential material handed to the authentication backend.

use crate::{AuthError, Result as AuthErrorResult};

use acct_core::ProviderKind;

/// Credential for sign-in or linking.
///
/// OAuth variants carry tokens obtained from an external sign-in flow.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Password { email: String, password: String },
    Google { id_token: String, access_token: String },
    /// `raw_nonce` is the unhashed nonce whose SHA-256 was sent to Apple
    Apple { id_token: String, raw_nonce: String },
}

impl Credential {
    pub fn password(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn google(id_token: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::Google {
            id_token: id_token.into(),
            access_token: access_token.into(),
        }
    }

    pub fn apple(id_token: impl Into<String>, raw_nonce: impl Into<String>) -> Self {
        Self::Apple {
            id_token: id_token.into(),
            raw_nonce: raw_nonce.into(),
        }
    }

    pub fn provider_kind(&self) -> ProviderKind {
        match self {
            Self::Password { .. } => ProviderKind::Password,
            Self::Google { .. } => ProviderKind::Google,
            Self::Apple { .. } => ProviderKind::Apple,
        }
    }

    /// Rejects blank fields before anything reaches the backend.
    #[track_caller]
    pub fn ensure_complete(&self) -> AuthErrorResult<()> {
        let fields: [(&'static str, &str); 2] = match self {
            Self::Password { email, password } => {
                [("email", email.as_str()), ("password", password.as_str())]
            }
            Self::Google {
                id_token,
                access_token,
            } => [
                ("id_token", id_token.as_str()),
                ("access_token", access_token.as_str()),
            ],
            Self::Apple {
                id_token,
                raw_nonce,
            } => [
                ("id_token", id_token.as_str()),
                ("raw_nonce", raw_nonce.as_str()),
            ],
        };

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some(&(field, _)) => Err(AuthError::empty_input(field)),
            None => Ok(()),
        }
    }
}

// Never print secrets
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Password { email, .. } => f
                .debug_struct("Password")
                .field("email", email)
                .finish_non_exhaustive(),
            Self::Google { .. } => f.debug_struct("Google").finish_non_exhaustive(),
            Self::Apple { .. } => f.debug_struct("Apple").finish_non_exhaustive(),
        }
    }
}

/// Tokens returned by the Google sign-in flow.
#[derive(Debug, Clone)]
pub struct GoogleSignInTokens {
    pub id_token: String,
    pub access_token: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl GoogleSignInTokens {
    pub fn into_credential(self) -> Credential {
        Credential::google(self.id_token, self.access_token)
    }
}

/// Result of a completed Sign in with Apple flow.
#[derive(Debug, Clone)]
pub struct AppleSignInResult {
    pub token: String,
    /// Raw nonce, sent back to the backend for verification
    pub nonce: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl AppleSignInResult {
    pub fn into_credential(self) -> Credential {
        Credential::apple(self.token, self.nonce)
    }
}
