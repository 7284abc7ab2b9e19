//! Client database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Client;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    #[sea_orm(unique)]
    pub login: String,
    pub password_hash: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Client {
    fn from(model: Model) -> Self {
        Client {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            phone: model.phone,
            login: model.login,
            password_hash: model.password_hash,
            created_at: model.created_at,
        }
    }
}
