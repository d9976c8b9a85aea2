//! Seam to the managed authentication service.

use crate::{Credential, Result as AuthErrorResult};

use acct_core::{Identity, known_providers};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// User record as the authentication backend reports it.
///
/// `provider_ids` are raw backend identifiers and may include providers
/// this client does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendUser {
    pub uid: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub is_anonymous: bool,
    pub provider_ids: Vec<String>,
}

impl BackendUser {
    pub fn into_identity(self) -> Identity {
        let providers = known_providers(&self.provider_ids);
        Identity::new(
            self.uid,
            self.email,
            self.photo_url,
            self.is_anonymous,
            providers,
        )
    }
}

/// Operations consumed from the authentication backend.
///
/// Implementations report failures with the shared `AuthError` taxonomy:
/// rejected input or tokens as `InvalidCredentials`, taken emails or
/// credentials as `AlreadyExists`, unknown or revoked sessions as
/// `SessionExpired`, and transport failures as `BackendUnavailable`.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn create_user(&self, email: &str, password: &str) -> AuthErrorResult<BackendUser>;

    async fn sign_in_with_password(&self, email: &str, password: &str)
    -> AuthErrorResult<BackendUser>;

    async fn sign_in_with_credential(&self, credential: &Credential)
    -> AuthErrorResult<BackendUser>;

    async fn sign_in_anonymously(&self) -> AuthErrorResult<BackendUser>;

    /// Attach `credential` to the account `uid`
    async fn link_credential(&self, uid: &str, credential: &Credential)
    -> AuthErrorResult<BackendUser>;

    async fn fetch_user(&self, uid: &str) -> AuthErrorResult<BackendUser>;

    /// Clear the session of `uid`
    async fn end_session(&self, uid: &str) -> AuthErrorResult<()>;

    async fn send_password_reset(&self, email: &str) -> AuthErrorResult<()>;

    async fn update_password(&self, uid: &str, new_password: &str) -> AuthErrorResult<()>;

    /// Send a verification mail; the email changes once it is confirmed
    async fn send_email_change_verification(&self, uid: &str, new_email: &str)
    -> AuthErrorResult<()>;

    async fn delete_user(&self, uid: &str) -> AuthErrorResult<()>;
}
