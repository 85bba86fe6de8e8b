//! Directory (Active Directory / LDAP) authentication.

mod ldap;

use async_trait::async_trait;
use thiserror::Error;

use domain::{DirectoryIdentity, Secret};

pub use ldap::LdapDirectory;

/// Why the directory refused or failed a bind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("Account '{0}' was not found in the directory.")]
    NotFound(String),

    #[error("Directory service is unavailable: {0}")]
    Unavailable(String),

    /// Failure reported by the server, passed through as-is
    #[error("{0}")]
    Rejected(String),
}

/// Verifies credentials against an external directory.
///
/// Implementations expose the secret only for the duration of the bind.
#[async_trait]
pub trait DirectoryAuthenticator: Send + Sync {
    /// Bind as `username` and return the directory's view of the account
    async fn authenticate(
        &self,
        username: &str,
        secret: &Secret,
    ) -> Result<DirectoryIdentity, DirectoryError>;
}
