//! Unified error types and result handling.
//!
//! Every operation reports failures through [`Error`]. Callers that need the
//! coarse taxonomy (for example to pick a transport status code) use
//! [`Error::kind`] and [`Error::field`].

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// All errors produced by the records backend.
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed a shape, format, sign or enum check before touching the store.
    #[error("Invalid value for `{field}`: {reason}")]
    Validation {
        /// Path of the offending input field
        field: String,
        /// Human-readable reason
        reason: String,
    },

    /// A referenced row does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity type that was looked up (e.g. "user")
        entity: &'static str,
        /// Id that was looked up
        id: i64,
    },

    /// The referenced row exists but does not hold the required role.
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Description of the role mismatch
        message: String,
    },

    /// A uniqueness rule would be violated.
    #[error("Conflict: {message}")]
    Conflict {
        /// Description of the conflicting value
        message: String,
    },

    /// The activity already holds its maximum number of participants.
    #[error("Activity {activity_id} is full ({max_participants} participants)")]
    CapacityExceeded {
        /// Activity that is full
        activity_id: i64,
        /// Its participant cap
        max_participants: i32,
    },

    /// Fields are individually valid but inconsistent with each other or with stored state.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the inconsistency
        message: String,
    },

    /// Application configuration could not be loaded.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Password hashing or verification failed.
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// Message from the hasher
        message: String,
    },

    /// Underlying store error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Audit snapshot could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O failure while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable is missing or not unicode.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Coarse error taxonomy reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input
    Validation,
    /// Referenced id does not exist
    NotFound,
    /// Referenced entity has the wrong role or authority
    PermissionDenied,
    /// Uniqueness violation or duplicate participation
    Conflict,
    /// Activity full
    CapacityExceeded,
    /// Inconsistent fields or stored state
    InvalidState,
    /// Store, configuration or other infrastructure failure
    Internal,
}

impl Error {
    /// Builds a [`Error::Validation`] for `field`.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the taxonomy bucket this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::Config { .. }
            | Self::PasswordHash { .. }
            | Self::Database(_)
            | Self::Serialization(_)
            | Self::Io(_)
            | Self::EnvVar(_) => ErrorKind::Internal,
        }
    }

    /// Returns the offending input field, if the error is tied to one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Maps a unique-constraint violation from the store to [`Error::Conflict`],
    /// passing every other store error through unchanged.
    pub fn conflict_on_unique(err: DbErr, message: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict {
                message: message.into(),
            },
            _ => Self::Database(err),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_field() {
        let err = Error::validation("email", "must be a valid email address");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), Some("email"));

        let err = Error::CapacityExceeded {
            activity_id: 3,
            max_participants: 1,
        };
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert_eq!(err.field(), None);
        assert_eq!(err.to_string(), "Activity 3 is full (1 participants)");
    }

    #[test]
    fn test_conflict_on_unique_passes_other_errors_through() {
        let err = Error::conflict_on_unique(DbErr::Custom("boom".to_string()), "dup");
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
