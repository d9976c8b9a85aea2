use crate::{CoreError, Result as CoreErrorResult};

use std::collections::BTreeSet;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use log::warn;
use serde::{Deserialize, Serialize};

/// Kind of credential attached to an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Email and password
    Password,
    /// Google OAuth
    Google,
    /// Sign in with Apple
    Apple,
}

impl ProviderKind {
    /// Provider identifier as reported by the authentication backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Google => "google.com",
            Self::Apple => "apple.com",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "password" => Ok(Self::Password),
            "google.com" => Ok(Self::Google),
            "apple.com" => Ok(Self::Apple),
            _ => Err(CoreError::InvalidProviderKind {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps backend provider ids to known kinds.
///
/// Unknown ids are logged and dropped so that a backend adding new
/// providers never breaks the call.
pub fn known_providers<I, S>(provider_ids: I) -> BTreeSet<ProviderKind>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    provider_ids
        .into_iter()
        .filter_map(|id| match ProviderKind::from_str(id.as_ref()) {
            Ok(kind) => Some(kind),
            Err(e) => {
                warn!("Ignoring unsupported provider: {e}");
                None
            }
        })
        .collect()
}
