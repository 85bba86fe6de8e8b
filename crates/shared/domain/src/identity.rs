//! Authentication modes and directory-provided identities.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MODE_DIRECTORY, MODE_LOCAL};
use crate::error::DomainError;

/// Where a login attempt verifies its credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationMode {
    /// Password hash stored in the local users table
    Local,
    /// External directory (Active Directory / LDAP)
    Directory,
}

impl AuthenticationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticationMode::Local => MODE_LOCAL,
            AuthenticationMode::Directory => MODE_DIRECTORY,
        }
    }
}

impl FromStr for AuthenticationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            MODE_LOCAL => Ok(AuthenticationMode::Local),
            MODE_DIRECTORY | "ad" => Ok(AuthenticationMode::Directory),
            other => Err(DomainError::validation(format!(
                "Unknown authentication mode '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for AuthenticationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity returned by the directory after a successful bind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryIdentity {
    pub username: String,
    pub full_name: String,
    pub email: String,
}

impl DirectoryIdentity {
    pub fn new(
        username: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            full_name: full_name.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("local".parse::<AuthenticationMode>().unwrap(), AuthenticationMode::Local);
        assert_eq!(" Directory ".parse::<AuthenticationMode>().unwrap(), AuthenticationMode::Directory);
        assert_eq!("AD".parse::<AuthenticationMode>().unwrap(), AuthenticationMode::Directory);
    }

    #[test]
    fn test_parse_unknown_mode() {
        let err = "kerberos".parse::<AuthenticationMode>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [AuthenticationMode::Local, AuthenticationMode::Directory] {
            assert_eq!(mode.to_string().parse::<AuthenticationMode>().unwrap(), mode);
        }
    }
}
