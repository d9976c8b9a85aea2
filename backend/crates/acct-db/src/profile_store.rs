//! Profile store synchronizer.
//!
//! Keeps one persistent profile per identity. Profiles are created lazily
//! on the first established session and mutated one field at a time.

use crate::{DbError, ProfileRepository, Result as DbErrorResult};

use acct_core::{FavoriteItem, Identity, ProfileRecord};

use log::{debug, info};
use sqlx::SqlitePool;

const PROFILE: &str = "Profile";

pub struct ProfileStore {
    profiles: ProfileRepository,
}

impl ProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            profiles: ProfileRepository::new(pool),
        }
    }

    /// Create the profile of `identity` if it does not exist yet.
    ///
    /// An existing profile is returned as stored; `date_created` and the
    /// mutable fields are never reset.
    pub async fn ensure_profile(&self, identity: &Identity) -> DbErrorResult<ProfileRecord> {
        let fresh = ProfileRecord::from_identity(identity);

        if self.profiles.insert_if_absent(&fresh).await? {
            info!("Created profile for {}", identity.id);
        } else {
            debug!("Profile for {} already exists", identity.id);
        }

        self.get_profile(&identity.id).await
    }

    pub async fn get_profile(&self, user_id: &str) -> DbErrorResult<ProfileRecord> {
        self.profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DbError::not_found(PROFILE, user_id))
    }

    pub async fn set_premium(&self, user_id: &str, is_premium: bool) -> DbErrorResult<()> {
        let updated = self.profiles.update_premium(user_id, is_premium).await?;
        Self::require_updated(updated, user_id)?;

        debug!("Set premium={is_premium} for {user_id}");
        Ok(())
    }

    pub async fn add_preference(&self, user_id: &str, value: &str) -> DbErrorResult<()> {
        self.require_profile(user_id).await?;

        if !self.profiles.insert_preference(user_id, value).await? {
            debug!("Preference '{value}' already present for {user_id}");
        }
        Ok(())
    }

    pub async fn remove_preference(&self, user_id: &str, value: &str) -> DbErrorResult<()> {
        self.require_profile(user_id).await?;

        if !self.profiles.delete_preference(user_id, value).await? {
            debug!("Preference '{value}' not present for {user_id}");
        }
        Ok(())
    }

    pub async fn set_favorite_item(&self, user_id: &str, item: &FavoriteItem) -> DbErrorResult<()> {
        let updated = self
            .profiles
            .update_favorite_item(user_id, Some(item))
            .await?;
        Self::require_updated(updated, user_id)
    }

    pub async fn clear_favorite_item(&self, user_id: &str) -> DbErrorResult<()> {
        let updated = self.profiles.update_favorite_item(user_id, None).await?;
        Self::require_updated(updated, user_id)
    }

    /// Mirror `identity` after a link: anonymity flag, email and photo.
    pub async fn sync_identity(&self, identity: &Identity) -> DbErrorResult<ProfileRecord> {
        let updated = self.profiles.update_identity_fields(identity).await?;
        Self::require_updated(updated, &identity.id)?;

        self.get_profile(&identity.id).await
    }

    pub async fn delete_profile(&self, user_id: &str) -> DbErrorResult<()> {
        let deleted = self.profiles.delete(user_id).await?;
        Self::require_updated(deleted, user_id)?;

        info!("Deleted profile for {user_id}");
        Ok(())
    }

    async fn require_profile(&self, user_id: &str) -> DbErrorResult<()> {
        if !self.profiles.exists(user_id).await? {
            return Err(DbError::not_found(PROFILE, user_id));
        }
        Ok(())
    }

    #[track_caller]
    fn require_updated(rows: u64, user_id: &str) -> DbErrorResult<()> {
        if rows == 0 {
            return Err(DbError::not_found(PROFILE, user_id));
        }
        Ok(())
    }
}
