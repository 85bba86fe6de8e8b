//! User service - account and role administration.
//!
//! SOLID (SRP): Handles user-related use cases only. Login attempts live in
//! the auth service.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{CreateUser, NewUser, Role, Secret, User};

use crate::repository::{RoleRepository, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a local account with a password
    async fn create_local_user(&self, request: CreateUser, password: &Secret) -> AppResult<User>;

    /// Activate or deactivate an account
    async fn set_active(&self, username: &str, active: bool) -> AppResult<User>;

    /// Assign a role by name
    async fn assign_role(&self, username: &str, role_name: &str) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// List all roles
    async fn list_roles(&self) -> AppResult<Vec<Role>>;
}

/// Concrete implementation of UserService using repositories.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl UserManager {
    /// Create new user service instance with repositories
    pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { users, roles }
    }

    async fn existing_user(&self, username: &str) -> AppResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_not_found("User")
    }

    async fn role_named(&self, role_name: &str) -> AppResult<Role> {
        self.roles
            .find_by_name(role_name)
            .await?
            .ok_or_not_found("Role")
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_local_user(&self, request: CreateUser, password: &Secret) -> AppResult<User> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }

        let role = self.role_named(&request.role_name).await?;
        let new_user = NewUser {
            username: username.to_string(),
            full_name: request.full_name,
            email: request.email,
            role,
            is_active: true,
        };

        let user = self.users.create(new_user, password).await?;
        tracing::info!(username = %user.username, user_id = %user.id, "Local user created");
        Ok(user)
    }

    async fn set_active(&self, username: &str, active: bool) -> AppResult<User> {
        let mut user = self.existing_user(username).await?;
        if user.is_active == active {
            return Ok(user);
        }

        user.set_active(active);
        self.users.update(&user).await?;
        tracing::info!(username = %user.username, active, "User activation changed");
        Ok(user)
    }

    async fn assign_role(&self, username: &str, role_name: &str) -> AppResult<User> {
        let mut user = self.existing_user(username).await?;
        let role = self.role_named(role_name).await?;

        user.assign_role(role);
        self.users.update(&user).await?;
        tracing::info!(username = %user.username, role = %role_name, "Role assigned");
        Ok(user)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.roles.list().await
    }
}
