//! Auth Service Library
//!
//! Verifies login attempts locally or against a directory, reconciles the
//! local user record and resolves the user's role.

pub mod config;
pub mod directory;
pub mod service;
pub mod session;

use std::sync::Arc;

use tracing::info;
use user_service_lib::config::UserServiceConfig;

use crate::config::AuthServiceConfig;
use crate::directory::LdapDirectory;
use crate::service::Authenticator;

/// Connect to the user store and build the authenticator from configuration.
pub async fn build_authenticator(
    config: &AuthServiceConfig,
) -> Result<Authenticator, Box<dyn std::error::Error>> {
    let stores = user_service_lib::connect_stores(&UserServiceConfig {
        database: config.database.clone(),
    })
    .await?;

    info!(directory = %config.directory.url, default_role = %config.default_role, "Authenticator ready");

    Ok(Authenticator::new(
        Arc::new(LdapDirectory::new(config.directory.clone())),
        stores.users,
        stores.roles,
    )
    .with_default_role(config.default_role.clone()))
}
