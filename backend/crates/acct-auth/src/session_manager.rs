use crate::{AuthBackend, AuthError, BackendUser, Credential, Result as AuthErrorResult};

use acct_core::{Identity, ProviderKind, known_providers};

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{Mutex, RwLock};

/// Owns the current signed-in identity.
///
/// Construct one per process and share it by reference or `Arc`; it is the
/// only writer of the current-session handle.
pub struct SessionManager {
    backend: Arc<dyn AuthBackend>,
    current: RwLock<Option<Identity>>,
    /// At most one link in flight
    link_lock: Mutex<()>,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            current: RwLock::new(None),
            link_lock: Mutex::new(()),
        }
    }

    pub async fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthErrorResult<Identity> {
        Self::require_non_empty("email", email)?;
        Self::require_non_empty("password", password)?;

        let user = self.backend.create_user(email, password).await?;
        Ok(self.establish(user, "sign-up").await)
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthErrorResult<Identity> {
        Self::require_non_empty("email", email)?;
        Self::require_non_empty("password", password)?;

        let user = self.backend.sign_in_with_password(email, password).await?;
        Ok(self.establish(user, "password sign-in").await)
    }

    pub async fn sign_in_anonymously(&self) -> AuthErrorResult<Identity> {
        let user = self.backend.sign_in_anonymously().await?;
        Ok(self.establish(user, "anonymous sign-in").await)
    }

    /// Exchange an OAuth token pair for a session.
    pub async fn sign_in_with_oauth(&self, credential: Credential) -> AuthErrorResult<Identity> {
        credential.ensure_complete()?;

        let user = self.backend.sign_in_with_credential(&credential).await?;
        Ok(self.establish(user, "oauth sign-in").await)
    }

    /// Attach a credential to the signed-in identity.
    ///
    /// Multi-provider accounts are permitted; attaching a kind that is
    /// already present fails with `AlreadyLinked` and leaves the identity
    /// untouched.
    pub async fn link_credential(
        &self,
        identity: &Identity,
        credential: Credential,
    ) -> AuthErrorResult<Identity> {
        let _link = self.link_lock.lock().await;

        // Re-read after acquiring the lock: a previous link may have landed
        let current = self
            .current
            .read()
            .await
            .clone()
            .ok_or_else(|| AuthError::session_expired("no signed-in identity to link"))?;

        if current.id != identity.id {
            return Err(AuthError::session_expired(format!(
                "identity {} is no longer signed in",
                identity.id
            )));
        }

        let kind = credential.provider_kind();
        if current.has_provider(kind) {
            return Err(AuthError::already_linked(kind));
        }

        credential.ensure_complete()?;

        let user = self.backend.link_credential(&current.id, &credential).await?;
        let linked = user.into_identity();

        if !linked.has_provider(kind) {
            warn!(
                "Backend accepted {kind} link for {} but did not report the provider",
                linked.id
            );
        }

        // Sign-out, sign-in or deletion may have replaced the session meanwhile
        let mut current = self.current.write().await;
        if current.as_ref().map(|c| c.id.as_str()) != Some(linked.id.as_str()) {
            warn!(
                "Session of {} ended while linking {kind}; keeping the current session",
                linked.id
            );
            return Err(AuthError::session_expired(format!(
                "identity {} was signed out during the link",
                linked.id
            )));
        }

        info!("Linked {kind} to {}", linked.id);
        *current = Some(linked.clone());
        Ok(linked)
    }

    pub async fn current_identity(&self) -> AuthErrorResult<Identity> {
        self.current
            .read()
            .await
            .clone()
            .ok_or_else(AuthError::no_active_session)
    }

    pub async fn is_signed_in(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Provider kinds attached to `identity`, as the backend reports them now.
    pub async fn list_providers(
        &self,
        identity: &Identity,
    ) -> AuthErrorResult<BTreeSet<ProviderKind>> {
        let user = self.backend.fetch_user(&identity.id).await?;
        Ok(known_providers(&user.provider_ids))
    }

    /// End the current session. Signing out while signed out is a no-op.
    pub async fn sign_out(&self) -> AuthErrorResult<()> {
        let mut current = self.current.write().await;

        let Some(identity) = current.as_ref() else {
            debug!("Sign-out requested with no active session");
            return Ok(());
        };

        self.backend.end_session(&identity.id).await.map_err(|e| match e {
            AuthError::SessionTeardownFailed { .. } => e,
            other => AuthError::session_teardown_failed(other.to_string()),
        })?;

        info!("Signed out {}", identity.id);
        *current = None;
        Ok(())
    }

    pub async fn request_password_reset(&self, email: &str) -> AuthErrorResult<()> {
        Self::require_non_empty("email", email)?;

        self.backend.send_password_reset(email).await?;
        info!("Password reset requested");
        Ok(())
    }

    pub async fn update_password(&self, new_password: &str) -> AuthErrorResult<()> {
        let identity = self.current_identity().await?;
        Self::require_non_empty("password", new_password)?;

        self.backend
            .update_password(&identity.id, new_password)
            .await?;
        info!("Password updated for {}", identity.id);
        Ok(())
    }

    /// Ask the backend to verify `new_email` before switching to it.
    pub async fn request_email_change(&self, new_email: &str) -> AuthErrorResult<()> {
        let identity = self.current_identity().await?;
        Self::require_non_empty("email", new_email)?;

        self.backend
            .send_email_change_verification(&identity.id, new_email)
            .await?;
        info!("Email change verification sent for {}", identity.id);
        Ok(())
    }

    /// Delete the signed-in account and end its session.
    ///
    /// Returns the identity that was deleted.
    pub async fn delete_current_identity(&self) -> AuthErrorResult<Identity> {
        let mut current = self.current.write().await;

        let identity = current.clone().ok_or_else(AuthError::no_active_session)?;

        self.backend.delete_user(&identity.id).await?;

        info!("Deleted account {}", identity.id);
        *current = None;
        Ok(identity)
    }

    async fn establish(&self, user: BackendUser, via: &str) -> Identity {
        let identity = user.into_identity();
        info!(
            "Session established via {via}: {} (anonymous: {})",
            identity.id,
            identity.is_anonymous()
        );
        *self.current.write().await = Some(identity.clone());
        identity
    }

    #[track_caller]
    fn require_non_empty(field: &'static str, value: &str) -> AuthErrorResult<()> {
        if value.trim().is_empty() {
            return Err(AuthError::empty_input(field));
        }
        Ok(())
    }
}
