use sea_orm_migration::prelude::*;

use crate::{
    m20250801_create_booking_tables::{
        BookingMenuItems, BookingMenuSets, BookingTables, Bookings,
    },
    m20250801_create_catalog_tables::MenuSetItems,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Availability and overlap checks filter bookings by time and status
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_date_time_status")
                    .table(Bookings::Table)
                    .col(Bookings::BookingDateTime)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        // Reverse lookups from a table to the bookings holding it
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_tables_table_id")
                    .table(BookingTables::Table)
                    .col(BookingTables::TableId)
                    .to_owned(),
            )
            .await?;

        // Best-seller aggregation joins on these
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_menu_sets_menu_set_id")
                    .table(BookingMenuSets::Table)
                    .col(BookingMenuSets::MenuSetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_menu_items_menu_item_id")
                    .table(BookingMenuItems::Table)
                    .col(BookingMenuItems::MenuItemId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_menu_set_items_menu_item_id")
                    .table(MenuSetItems::Table)
                    .col(MenuSetItems::MenuItemId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_menu_set_items_menu_item_id")
                    .table(MenuSetItems::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_booking_menu_items_menu_item_id")
                    .table(BookingMenuItems::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_booking_menu_sets_menu_set_id")
                    .table(BookingMenuSets::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_booking_tables_table_id")
                    .table(BookingTables::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_bookings_date_time_status")
                    .table(Bookings::Table)
                    .to_owned(),
            )
            .await
    }
}
