//! Booking database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::staff_user;
use crate::domain::Booking;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub area: i32,
    pub service_type: String,
    pub comment: String,
    pub status: String,
    pub booking_date: Option<Date>,
    pub booking_time: Option<Time>,
    pub assignee_id: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff_user::Entity",
        from = "Column::AssigneeId",
        to = "super::staff_user::Column::Id"
    )]
    Assignee,
}

impl Related<staff_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Booking joined with its assignee, if any
impl From<(Model, Option<staff_user::Model>)> for Booking {
    fn from((model, assignee): (Model, Option<staff_user::Model>)) -> Self {
        Booking {
            assignee_name: assignee.map(|a| a.full_name),
            ..Booking::from(model)
        }
    }
}

/// Convert database model to domain entity
impl From<Model> for Booking {
    fn from(model: Model) -> Self {
        Booking {
            id: model.id,
            name: model.name,
            phone: model.phone,
            email: model.email,
            address: model.address,
            area: model.area,
            service_type: model.service_type,
            comment: model.comment,
            status: model.status,
            booking_date: model.booking_date,
            booking_time: model.booking_time,
            assignee_id: model.assignee_id,
            assignee_name: None,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
