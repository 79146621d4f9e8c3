//! Create reservations table
//!
//! One row per booked stay. `departure` is exclusive.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_clients::Clients;
use super::m20250101_000002_create_rooms::Rooms;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::ClientId).integer().not_null())
                    .col(ColumnDef::new(Reservations::RoomId).integer().not_null())
                    .col(ColumnDef::new(Reservations::Arrival).date().not_null())
                    .col(ColumnDef::new(Reservations::Departure).date().not_null())
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("Confirmed"),
                    )
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_client")
                            .from(Reservations::Table, Reservations::ClientId)
                            .to(Clients::Table, Clients::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_room")
                            .from(Reservations::Table, Reservations::RoomId)
                            .to(Rooms::Table, Rooms::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_room")
                    .table(Reservations::Table)
                    .col(Reservations::RoomId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_client")
                    .table(Reservations::Table)
                    .col(Reservations::ClientId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    ClientId,
    RoomId,
    Arrival,
    Departure,
    Status,
    CreatedAt,
}
