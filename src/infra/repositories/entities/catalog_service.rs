//! Catalog entry database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::CatalogEntry;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub icon: String,
    pub price: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CatalogEntry {
    fn from(model: Model) -> Self {
        CatalogEntry {
            id: model.id,
            title: model.title,
            description: model.description,
            icon: model.icon,
            price: model.price,
        }
    }
}
