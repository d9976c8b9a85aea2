use acct_core::ProviderKind;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials: {message} {location}")]
    InvalidCredentials {
        message: String,
        location: ErrorLocation,
    },

    #[error("Account already exists: {message} {location}")]
    AlreadyExists {
        message: String,
        location: ErrorLocation,
    },

    #[error("Provider {provider} is already linked {location}")]
    AlreadyLinked {
        provider: ProviderKind,
        location: ErrorLocation,
    },

    #[error("No active session {location}")]
    NoActiveSession { location: ErrorLocation },

    #[error("Session expired: {message} {location}")]
    SessionExpired {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session teardown failed: {message} {location}")]
    SessionTeardownFailed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Authentication backend unavailable: {message} {location}")]
    BackendUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Required field '{field}' is empty {location}")]
    EmptyInput {
        field: &'static str,
        location: ErrorLocation,
    },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("JWT encode failed: {source} {location}")]
    JwtEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Stable machine-readable code for UI layers.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::AlreadyLinked { .. } => "ALREADY_LINKED",
            Self::NoActiveSession { .. } => "NO_ACTIVE_SESSION",
            Self::SessionExpired { .. } => "SESSION_EXPIRED",
            Self::SessionTeardownFailed { .. } => "SESSION_TEARDOWN_FAILED",
            Self::BackendUnavailable { .. } => "BACKEND_UNAVAILABLE",
            Self::EmptyInput { .. } => "EMPTY_INPUT",
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::JwtDecode { .. } => "JWT_DECODE_FAILED",
            Self::JwtEncode { .. } => "JWT_ENCODE_FAILED",
        }
    }

    /// Whether the caller may reasonably re-invoke the operation unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::BackendUnavailable { .. } | Self::SessionTeardownFailed { .. }
        )
    }

    #[track_caller]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn already_linked(provider: ProviderKind) -> Self {
        Self::AlreadyLinked {
            provider,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_active_session() -> Self {
        Self::NoActiveSession {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn session_expired(message: impl Into<String>) -> Self {
        Self::SessionExpired {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn session_teardown_failed(message: impl Into<String>) -> Self {
        Self::SessionTeardownFailed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn empty_input(field: &'static str) -> Self {
        Self::EmptyInput {
            field,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
