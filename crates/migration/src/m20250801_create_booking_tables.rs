use sea_orm_migration::prelude::*;

use crate::m20250801_create_catalog_tables::{MenuItems, MenuSets, Tables};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create bookings table
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bookings::CustomerName).text().not_null())
                    .col(ColumnDef::new(Bookings::CompanyName).text())
                    .col(
                        ColumnDef::new(Bookings::BookingDateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::PhoneNumber).text().not_null())
                    .col(
                        ColumnDef::new(Bookings::NumChildren)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Bookings::NumAdults).integer().not_null())
                    .col(ColumnDef::new(Bookings::NumTables).integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::TotalPrice)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .text()
                            .not_null()
                            .default("CONFIRMED"),
                    )
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

        // Create booking_tables junction table; a booking holds each table once
        manager
            .create_table(
                Table::create()
                    .table(BookingTables::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BookingTables::BookingId).uuid().not_null())
                    .col(ColumnDef::new(BookingTables::TableId).uuid().not_null())
                    .col(ColumnDef::new(BookingTables::Position).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(BookingTables::BookingId)
                            .col(BookingTables::TableId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-booking_tables-booking_id")
                            .from(BookingTables::Table, BookingTables::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-booking_tables-table_id")
                            .from(BookingTables::Table, BookingTables::TableId)
                            .to(Tables::Table, Tables::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create booking_menu_sets junction table
        manager
            .create_table(
                Table::create()
                    .table(BookingMenuSets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BookingMenuSets::BookingId).uuid().not_null())
                    .col(ColumnDef::new(BookingMenuSets::MenuSetId).uuid().not_null())
                    .col(
                        ColumnDef::new(BookingMenuSets::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(BookingMenuSets::Quantity).gt(0)),
                    )
                    .col(ColumnDef::new(BookingMenuSets::Position).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(BookingMenuSets::BookingId)
                            .col(BookingMenuSets::MenuSetId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-booking_menu_sets-booking_id")
                            .from(BookingMenuSets::Table, BookingMenuSets::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-booking_menu_sets-menu_set_id")
                            .from(BookingMenuSets::Table, BookingMenuSets::MenuSetId)
                            .to(MenuSets::Table, MenuSets::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create booking_menu_items junction table for items ordered outside a set
        manager
            .create_table(
                Table::create()
                    .table(BookingMenuItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BookingMenuItems::BookingId).uuid().not_null())
                    .col(ColumnDef::new(BookingMenuItems::MenuItemId).uuid().not_null())
                    .col(
                        ColumnDef::new(BookingMenuItems::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(BookingMenuItems::Quantity).gt(0)),
                    )
                    .col(ColumnDef::new(BookingMenuItems::Position).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(BookingMenuItems::BookingId)
                            .col(BookingMenuItems::MenuItemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-booking_menu_items-booking_id")
                            .from(BookingMenuItems::Table, BookingMenuItems::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-booking_menu_items-menu_item_id")
                            .from(BookingMenuItems::Table, BookingMenuItems::MenuItemId)
                            .to(MenuItems::Table, MenuItems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingMenuItems::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(BookingMenuSets::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(BookingTables::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    CustomerName,
    CompanyName,
    BookingDateTime,
    PhoneNumber,
    NumChildren,
    NumAdults,
    NumTables,
    TotalPrice,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum BookingTables {
    Table,
    BookingId,
    TableId,
    Position,
}

#[derive(Iden)]
pub enum BookingMenuSets {
    Table,
    BookingId,
    MenuSetId,
    Quantity,
    Position,
}

#[derive(Iden)]
pub enum BookingMenuItems {
    Table,
    BookingId,
    MenuItemId,
    Quantity,
    Position,
}
