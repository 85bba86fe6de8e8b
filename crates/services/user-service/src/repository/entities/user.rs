//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::User;

use super::role;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    /// NULL = no role assigned
    pub role_id: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Build the domain user from a row and its (optionally) joined role.
pub fn into_domain(model: Model, role: Option<role::Model>) -> User {
    User {
        id: model.id,
        username: model.username,
        full_name: model.full_name,
        email: model.email,
        password_hash: model.password_hash,
        role_id: model.role_id,
        role: role.map(Into::into),
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Convert database model to domain entity (role not loaded)
impl From<Model> for User {
    fn from(model: Model) -> Self {
        into_domain(model, None)
    }
}
