use acct_core::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("{entity} not found: {id} {location}")]
    NotFound {
        entity: &'static str,
        id: String,
        location: ErrorLocation,
    },

    #[error("Document store unavailable: {message} {location}")]
    BackendUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Serialization error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    #[track_caller]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Errors worth retrying once the store is reachable again
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Sqlx { .. } => "DATABASE_ERROR",
            Self::Migration { .. } => "MIGRATION_FAILED",
            Self::Initialization { .. } => "DATABASE_INIT_FAILED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::BackendUnavailable { .. } => "BACKEND_UNAVAILABLE",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match source {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::BackendUnavailable {
                    message: source.to_string(),
                    location,
                }
            }
            source => Self::Sqlx { source, location },
        }
    }
}

impl From<serde_json::Error> for DbError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
