//! Migration: Create bookings table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::Name).string().not_null())
                    .col(ColumnDef::new(Bookings::Phone).string().not_null())
                    .col(ColumnDef::new(Bookings::Email).string().not_null())
                    .col(ColumnDef::new(Bookings::Address).string().not_null())
                    .col(ColumnDef::new(Bookings::Area).integer().not_null())
                    .col(ColumnDef::new(Bookings::ServiceType).string().not_null())
                    .col(
                        ColumnDef::new(Bookings::Comment)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("new"),
                    )
                    .col(ColumnDef::new(Bookings::BookingDate).date().null())
                    .col(ColumnDef::new(Bookings::BookingTime).time().null())
                    .col(ColumnDef::new(Bookings::AssigneeId).integer().null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Admin list is ordered newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_created_at")
                    .table(Bookings::Table)
                    .col(Bookings::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    Name,
    Phone,
    Email,
    Address,
    Area,
    ServiceType,
    Comment,
    Status,
    BookingDate,
    BookingTime,
    AssigneeId,
    CreatedAt,
    UpdatedAt,
}
