//! User Service Library
//!
//! Persistence of users and roles (SeaORM), plus the administrative use
//! cases around them. The auth service consumes the repositories directly.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::DbErr;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{RoleStore, UserStore};
use crate::service::UserManager;

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    action: MigrateAction,
    config: &UserServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Repositories backed by one database connection.
pub struct Stores {
    pub users: Arc<UserStore>,
    pub roles: Arc<RoleStore>,
}

/// Connect (applying pending migrations) and build the repositories.
pub async fn connect_stores(config: &UserServiceConfig) -> Result<Stores, DbErr> {
    let db = Database::connect(&config.database).await?;
    let conn = db.get_connection();

    Ok(Stores {
        users: Arc::new(UserStore::new(conn.clone())),
        roles: Arc::new(RoleStore::new(conn)),
    })
}

/// Build the administrative service over freshly connected repositories.
pub async fn user_manager(config: &UserServiceConfig) -> Result<UserManager, DbErr> {
    let stores = connect_stores(config).await?;
    Ok(UserManager::new(stores.users, stores.roles))
}
