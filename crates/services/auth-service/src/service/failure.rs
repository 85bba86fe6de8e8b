//! Typed reasons a login attempt can fail.

use thiserror::Error;

/// Expected failure of a login attempt.
///
/// `Display` yields the message shown to the person logging in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// Missing username or password; nothing was looked up
    #[error("{0}")]
    Validation(String),

    /// The directory refused the credentials or could not be reached
    #[error("{0}")]
    Directory(String),

    /// Roles are misconfigured (default role missing, role unresolvable)
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("User account is inactive.")]
    AccountInactive,

    /// Unknown user or wrong password; deliberately indistinguishable
    #[error("Invalid username or password.")]
    InvalidCredentials,

    /// The user store failed
    #[error("{0}")]
    Persistence(String),
}

impl AuthFailure {
    /// Stable code for logs and callers that branch on the failure kind
    pub fn code(&self) -> &'static str {
        match self {
            AuthFailure::Validation(_) => "VALIDATION_ERROR",
            AuthFailure::Directory(_) => "DIRECTORY_AUTH_ERROR",
            AuthFailure::Configuration(_) => "CONFIGURATION_ERROR",
            AuthFailure::AccountInactive => "ACCOUNT_INACTIVE",
            AuthFailure::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthFailure::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AuthFailure::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AuthFailure::Configuration(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        AuthFailure::Persistence(msg.into())
    }
}
