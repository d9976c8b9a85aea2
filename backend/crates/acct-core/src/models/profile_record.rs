//! Profile record - persisted user document, one per identity.

use crate::{FavoriteItem, Identity};

use std::collections::BTreeSet;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: String,
    pub is_anonymous: bool,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    /// Set once on creation
    pub date_created: DateTime<Utc>,
    pub is_premium: bool,
    pub preferences: BTreeSet<String>,
    pub favorite_item: Option<FavoriteItem>,
}

impl ProfileRecord {
    /// Fresh record for a newly established identity
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            user_id: identity.id.clone(),
            is_anonymous: identity.is_anonymous(),
            email: identity.email.clone(),
            photo_url: identity.photo_url.clone(),
            // Stored with second precision
            date_created: Utc::now().trunc_subsecs(0),
            is_premium: false,
            preferences: BTreeSet::new(),
            favorite_item: None,
        }
    }

    pub fn has_preference(&self, value: &str) -> bool {
        self.preferences.contains(value)
    }
}
