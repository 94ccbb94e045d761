use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_set_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub menu_set_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub menu_item_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::menu_set::Entity",
        from = "Column::MenuSetId",
        to = "super::menu_set::Column::Id",
        on_delete = "Cascade"
    )]
    MenuSet,
    #[sea_orm(
        belongs_to = "super::menu_item::Entity",
        from = "Column::MenuItemId",
        to = "super::menu_item::Column::Id",
        on_delete = "Cascade"
    )]
    MenuItem,
}

impl Related<super::menu_set::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuSet.def()
    }
}

impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
