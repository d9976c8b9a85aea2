use crate::error::{AppError, Result as AppErrorResult};

use acct_auth::{Credential, SessionManager};
use acct_core::{FavoriteItem, Identity, ProfileRecord, ProviderKind};
use acct_db::{DbError, ProfileStore};

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{info, warn};
use serde::Serialize;

/// Identity and profile as seen right after a session change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSnapshot {
    pub identity: Identity,
    pub profile: ProfileRecord,
}

/// Composes the session manager and the profile store.
///
/// Every successful session establishment is followed by `ensure_profile`,
/// every link by a profile identity sync. Profile edits always target the
/// signed-in identity.
pub struct AccountService {
    sessions: Arc<SessionManager>,
    profiles: Arc<ProfileStore>,
}

impl AccountService {
    pub fn new(sessions: Arc<SessionManager>, profiles: Arc<ProfileStore>) -> Self {
        Self { sessions, profiles }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub async fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AppErrorResult<AccountSnapshot> {
        let identity = self.sessions.sign_up_with_password(email, password).await?;
        self.snapshot(identity).await
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AppErrorResult<AccountSnapshot> {
        let identity = self.sessions.sign_in_with_password(email, password).await?;
        self.snapshot(identity).await
    }

    pub async fn sign_in_anonymously(&self) -> AppErrorResult<AccountSnapshot> {
        let identity = self.sessions.sign_in_anonymously().await?;
        self.snapshot(identity).await
    }

    pub async fn sign_in_with_oauth(
        &self,
        credential: Credential,
    ) -> AppErrorResult<AccountSnapshot> {
        let identity = self.sessions.sign_in_with_oauth(credential).await?;
        self.snapshot(identity).await
    }

    /// Link `credential` to the signed-in identity and mirror the result
    /// into its profile.
    pub async fn link(&self, credential: Credential) -> AppErrorResult<AccountSnapshot> {
        let current = self.sessions.current_identity().await?;
        let linked = self.sessions.link_credential(&current, credential).await?;

        // Profiles created before this service existed are backfilled
        self.profiles.ensure_profile(&linked).await?;
        let profile = self.profiles.sync_identity(&linked).await?;

        Ok(AccountSnapshot {
            identity: linked,
            profile,
        })
    }

    pub async fn providers(&self) -> AppErrorResult<BTreeSet<ProviderKind>> {
        let current = self.sessions.current_identity().await?;
        Ok(self.sessions.list_providers(&current).await?)
    }

    pub async fn profile(&self) -> AppErrorResult<ProfileRecord> {
        let user_id = self.current_user_id().await?;
        Ok(self.profiles.get_profile(&user_id).await?)
    }

    pub async fn set_premium(&self, is_premium: bool) -> AppErrorResult<ProfileRecord> {
        let user_id = self.current_user_id().await?;
        self.profiles.set_premium(&user_id, is_premium).await?;
        Ok(self.profiles.get_profile(&user_id).await?)
    }

    pub async fn add_preference(&self, value: &str) -> AppErrorResult<ProfileRecord> {
        let user_id = self.current_user_id().await?;
        self.profiles.add_preference(&user_id, value).await?;
        Ok(self.profiles.get_profile(&user_id).await?)
    }

    pub async fn remove_preference(&self, value: &str) -> AppErrorResult<ProfileRecord> {
        let user_id = self.current_user_id().await?;
        self.profiles.remove_preference(&user_id, value).await?;
        Ok(self.profiles.get_profile(&user_id).await?)
    }

    pub async fn set_favorite_item(&self, item: &FavoriteItem) -> AppErrorResult<ProfileRecord> {
        let user_id = self.current_user_id().await?;
        self.profiles.set_favorite_item(&user_id, item).await?;
        Ok(self.profiles.get_profile(&user_id).await?)
    }

    pub async fn clear_favorite_item(&self) -> AppErrorResult<ProfileRecord> {
        let user_id = self.current_user_id().await?;
        self.profiles.clear_favorite_item(&user_id).await?;
        Ok(self.profiles.get_profile(&user_id).await?)
    }

    pub async fn sign_out(&self) -> AppErrorResult<()> {
        Ok(self.sessions.sign_out().await?)
    }

    /// Delete the signed-in identity, then its profile.
    ///
    /// A profile that was never created is not an error.
    pub async fn delete_account(&self) -> AppErrorResult<Identity> {
        let identity = self.sessions.delete_current_identity().await?;

        match self.profiles.delete_profile(&identity.id).await {
            Ok(()) => {}
            Err(DbError::NotFound { .. }) => {
                warn!("Deleted account {} had no profile", identity.id);
            }
            Err(e) => return Err(AppError::from(e)),
        }

        info!("Account {} removed", identity.id);
        Ok(identity)
    }

    async fn snapshot(&self, identity: Identity) -> AppErrorResult<AccountSnapshot> {
        let profile = self.profiles.ensure_profile(&identity).await?;
        Ok(AccountSnapshot { identity, profile })
    }

    async fn current_user_id(&self) -> AppErrorResult<String> {
        Ok(self.sessions.current_identity().await?.id)
    }
}
