//! Migration: Create clients table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clients::FullName).string().not_null())
                    .col(ColumnDef::new(Clients::Email).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Clients::Phone)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Clients::Login).string().not_null().unique_key())
                    .col(ColumnDef::new(Clients::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Clients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Clients {
    Table,
    Id,
    FullName,
    Email,
    Phone,
    Login,
    PasswordHash,
    CreatedAt,
}
