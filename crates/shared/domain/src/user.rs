//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::DirectoryIdentity;
use crate::role::Role;

/// Application user as persisted in the local store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Foreign key into the roles table (None = no role assigned)
    pub role_id: Option<i32>,
    /// Role row, when the repository loaded it alongside the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the account may log in
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Copy non-empty profile fields from the directory.
    ///
    /// Returns `true` when anything changed and the user needs saving.
    pub fn apply_directory_profile(&mut self, identity: &DirectoryIdentity) -> bool {
        let mut changed = false;

        if !identity.full_name.is_empty() && self.full_name != identity.full_name {
            self.full_name = identity.full_name.clone();
            changed = true;
        }
        if !identity.email.is_empty() && self.email != identity.email {
            self.email = identity.email.clone();
            changed = true;
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    /// Activate or deactivate the account
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }

    /// Assign a role, keeping the loaded role and the foreign key in step
    pub fn assign_role(&mut self, role: Role) {
        self.role_id = Some(role.id);
        self.role = Some(role);
        self.updated_at = Utc::now();
    }
}

/// Data needed to insert a user; the repository hashes the initial secret.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

impl NewUser {
    /// Account provisioned from a verified directory identity
    pub fn from_directory(identity: &DirectoryIdentity, role: Role) -> Self {
        Self {
            username: identity.username.clone(),
            full_name: identity.full_name.clone(),
            email: identity.email.clone(),
            role,
            is_active: true,
        }
    }
}

/// Administrative request to create a local account
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub full_name: String,
    pub email: String,
    /// Name of the role to assign
    pub role_name: String,
}

/// User representation safe to print or serialise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
    /// Role name, if one is loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role.as_ref().map(|r| r.name.clone()),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse::from(&user)
    }
}
