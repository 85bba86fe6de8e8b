//! Auth service configuration.

use std::env;

use common::{DatabaseConfig, DirectoryConfig};
use domain::DEFAULT_ROLE;

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Database holding users and roles
    pub database: DatabaseConfig,
    /// Directory used for `directory` mode logins
    pub directory: DirectoryConfig,
    /// Role assigned to directory users provisioned on first login
    pub default_role: String,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = DirectoryConfig::default();

        Self {
            database: DatabaseConfig::from_env("AUTH_SERVICE"),
            directory: DirectoryConfig {
                url: env::var("DIRECTORY_URL").unwrap_or(defaults.url),
                domain: env::var("DIRECTORY_DOMAIN").ok(),
                upn_suffix: env::var("DIRECTORY_UPN_SUFFIX").ok(),
                base_dn: env::var("DIRECTORY_BASE_DN").unwrap_or(defaults.base_dn),
                connect_timeout_secs: env::var("DIRECTORY_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.connect_timeout_secs),
            },
            default_role: env::var("AUTH_DEFAULT_ROLE")
                .ok()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        }
    }
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            directory: DirectoryConfig::default(),
            default_role: DEFAULT_ROLE.to_string(),
        }
    }
}
