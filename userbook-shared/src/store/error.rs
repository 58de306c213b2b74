//! Store error types

use thiserror::Error;

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcomes of a store operation other than success
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No user is stored under the requested email
    #[error("user not found: {email}")]
    NotFound { email: String },

    /// A user is already stored under the email being created
    #[error("user already exists: {email}")]
    Conflict { email: String },

    /// A shard lock was poisoned by a panicking writer
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StoreError {
    pub(crate) fn not_found(email: &str) -> Self {
        StoreError::NotFound {
            email: email.to_string(),
        }
    }

    pub(crate) fn conflict(email: &str) -> Self {
        StoreError::Conflict {
            email: email.to_string(),
        }
    }
}
