//! Identity - the signed-in account as reported by the authentication backend.

use crate::ProviderKind;

use std::collections::BTreeSet;

use log::warn;
use serde::{Deserialize, Serialize};

/// Authenticated session handle for one account.
///
/// An anonymous identity never carries providers; linking any credential
/// makes it permanent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IdentityFields")]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    is_anonymous: bool,
    providers: BTreeSet<ProviderKind>,
}

/// Wire shape of [`Identity`]; deserialized values go through `Identity::new`.
#[derive(Deserialize)]
struct IdentityFields {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    is_anonymous: bool,
    #[serde(default)]
    providers: BTreeSet<ProviderKind>,
}

impl From<IdentityFields> for Identity {
    fn from(f: IdentityFields) -> Self {
        Self::new(f.id, f.email, f.photo_url, f.is_anonymous, f.providers)
    }
}

impl Identity {
    /// Build an identity, reconciling the anonymous flag with the providers.
    ///
    /// A backend that reports `is_anonymous` alongside attached providers is
    /// trusted on the providers.
    pub fn new(
        id: String,
        email: Option<String>,
        photo_url: Option<String>,
        is_anonymous: bool,
        providers: BTreeSet<ProviderKind>,
    ) -> Self {
        let is_anonymous = if is_anonymous && !providers.is_empty() {
            warn!("Identity {id} reported anonymous with providers {providers:?}; treating as permanent");
            false
        } else {
            is_anonymous
        };

        Self {
            id,
            email,
            photo_url,
            is_anonymous,
            providers,
        }
    }

    /// Anonymous identity with no credentials attached
    pub fn anonymous(id: String) -> Self {
        Self::new(id, None, None, true, BTreeSet::new())
    }

    pub fn is_anonymous(&self) -> bool {
        self.is_anonymous
    }

    pub fn providers(&self) -> &BTreeSet<ProviderKind> {
        &self.providers
    }

    pub fn has_provider(&self, kind: ProviderKind) -> bool {
        self.providers.contains(&kind)
    }
}
