use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create table_types table, keyed by the table type name
        manager
            .create_table(
                Table::create()
                    .table(TableTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TableTypes::Type).text().not_null().primary_key())
                    .col(
                        ColumnDef::new(TableTypes::SeatCount)
                            .integer()
                            .not_null()
                            .check(Expr::col(TableTypes::SeatCount).gt(0)),
                    )
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(TableTypes::Table)
            .columns([TableTypes::Type, TableTypes::SeatCount])
            .values_panic(["STANDARD".into(), 4.into()])
            .values_panic(["LARGE".into(), 8.into()])
            .to_owned();
        manager.exec_stmt(seed).await?;

        // Create tables table
        manager
            .create_table(
                Table::create()
                    .table(Tables::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tables::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Tables::NumTable)
                            .integer()
                            .not_null()
                            .unique_key()
                            .check(Expr::col(Tables::NumTable).gt(0)),
                    )
                    .col(ColumnDef::new(Tables::Type).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-tables-type")
                            .from(Tables::Table, Tables::Type)
                            .to(TableTypes::Table, TableTypes::Type)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create menu_items table
        manager
            .create_table(
                Table::create()
                    .table(MenuItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MenuItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(MenuItems::NameTh).text().not_null().unique_key())
                    .col(ColumnDef::new(MenuItems::NameEn).text().not_null().unique_key())
                    .col(ColumnDef::new(MenuItems::Description).text())
                    .col(
                        ColumnDef::new(MenuItems::Price)
                            .double()
                            .not_null()
                            .check(Expr::col(MenuItems::Price).gte(0)),
                    )
                    .col(ColumnDef::new(MenuItems::Category).text().not_null())
                    .col(ColumnDef::new(MenuItems::ImageUrl).text())
                    .to_owned(),
            )
            .await?;

        // Create menu_sets table
        manager
            .create_table(
                Table::create()
                    .table(MenuSets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MenuSets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(MenuSets::Name).text().not_null().unique_key())
                    .col(
                        ColumnDef::new(MenuSets::Price)
                            .double()
                            .not_null()
                            .check(Expr::col(MenuSets::Price).gte(0)),
                    )
                    .to_owned(),
            )
            .await?;

        // Create menu_set_items junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(MenuSetItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MenuSetItems::MenuSetId).uuid().not_null())
                    .col(ColumnDef::new(MenuSetItems::MenuItemId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(MenuSetItems::MenuSetId)
                            .col(MenuSetItems::MenuItemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-menu_set_items-menu_set_id")
                            .from(MenuSetItems::Table, MenuSetItems::MenuSetId)
                            .to(MenuSets::Table, MenuSets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-menu_set_items-menu_item_id")
                            .from(MenuSetItems::Table, MenuSetItems::MenuItemId)
                            .to(MenuItems::Table, MenuItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).text().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).text().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .text()
                            .not_null()
                            .default("user"),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
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
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MenuSetItems::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MenuSets::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MenuItems::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Tables::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TableTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum TableTypes {
    Table,
    #[iden = "type"]
    Type,
    SeatCount,
}

#[derive(Iden)]
pub enum Tables {
    Table,
    Id,
    NumTable,
    #[iden = "type"]
    Type,
}

#[derive(Iden)]
pub enum MenuItems {
    Table,
    Id,
    NameTh,
    NameEn,
    Description,
    Price,
    Category,
    ImageUrl,
}

#[derive(Iden)]
pub enum MenuSets {
    Table,
    Id,
    Name,
    Price,
}

#[derive(Iden)]
pub enum MenuSetItems {
    Table,
    MenuSetId,
    MenuItemId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    Role,
    CreatedAt,
}
