use models::table::TableType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tables")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub num_table: i32,
    #[sea_orm(column_name = "type")]
    pub table_type: TableType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::table_type::Entity",
        from = "Column::TableType",
        to = "super::table_type::Column::TableType"
    )]
    TableType,
    #[sea_orm(has_many = "super::booking_table::Entity")]
    BookingTables,
}

impl Related<super::table_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TableType.def()
    }
}

impl Related<super::booking_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingTables.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
