//! User repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::entities::role::Entity as RoleEntity;
use super::entities::user::{self, into_domain, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{NewUser, Password, Secret, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups load the user's role alongside the row when one is assigned.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Create a new user; the initial secret is hashed before storage
    async fn create(&self, user: NewUser, initial_secret: &Secret) -> AppResult<User>;

    /// Persist profile, role and activation changes
    async fn update(&self, user: &User) -> AppResult<()>;

    /// List all users ordered by username
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Usernames match regardless of case, like the directory they mirror.
fn username_matches(username: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((UserEntity, user::Column::Username))))
        .eq(username.to_lowercase())
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(username_matches(username))
            .find_also_related(RoleEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(|(model, role)| into_domain(model, role)))
    }

    async fn create(&self, user: NewUser, initial_secret: &Secret) -> AppResult<User> {
        let password_hash = {
            let plain = initial_secret.expose();
            Password::new(&plain)?.into_string()
        };

        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(user.username),
            full_name: Set(user.full_name),
            email: Set(user.email),
            password_hash: Set(password_hash),
            role_id: Set(Some(user.role.id)),
            is_active: Set(user.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        let mut created = User::from(model);
        created.role = Some(user.role);
        Ok(created)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let model = UserEntity::find_by_id(user.id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let mut active: ActiveModel = model.into();
        active.full_name = Set(user.full_name.clone());
        active.email = Set(user.email.clone());
        active.role_id = Set(user.role_id);
        active.is_active = Set(user.is_active);
        active.updated_at = Set(chrono::Utc::now());

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let rows = UserEntity::find()
            .find_also_related(RoleEntity)
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(model, role)| into_domain(model, role))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_username_lookup_ignores_case() {
        let sql = UserEntity::find()
            .filter(username_matches("JDoe"))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#"LOWER("users"."username")"#), "{}", sql);
        assert!(sql.contains("'jdoe'"), "{}", sql);
        assert!(!sql.contains("JDoe"), "{}", sql);
    }
}
