//! Errors raised while building domain values.

use thiserror::Error;

/// Rejected input or a failed hashing step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input, e.g. an unknown authentication mode
    #[error("Validation error: {0}")]
    Validation(String),

    /// Password does not meet the local account rules
    #[error("Password error: {0}")]
    Password(String),

    /// Hashing failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
