use models::table::TableType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Seat count per table type
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "table_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "type")]
    pub table_type: TableType,
    pub seat_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::dining_table::Entity")]
    DiningTables,
}

impl Related<super::dining_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiningTables.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
