//! Staff user database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{StaffRole, StaffUser};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    pub phone: String,
    #[sea_orm(unique)]
    pub login: Option<String>,
    pub password_hash: Option<String>,
    pub role: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// The column is only ever written from a parsed `StaffRole`; an unknown
/// value falls back to the least privileged role.
impl From<Model> for StaffUser {
    fn from(model: Model) -> Self {
        let role = model.role.parse().unwrap_or_else(|_| {
            tracing::warn!(id = model.id, role = %model.role, "Unknown staff role in store");
            StaffRole::Operator
        });

        StaffUser {
            id: model.id,
            full_name: model.full_name,
            phone: model.phone,
            login: model.login,
            password_hash: model.password_hash,
            role,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
