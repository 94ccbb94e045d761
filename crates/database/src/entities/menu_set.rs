use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_sets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::menu_set_item::Entity")]
    MenuSetItems,
    #[sea_orm(has_many = "super::booking_menu_set::Entity")]
    BookingMenuSets,
}

impl Related<super::menu_set_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuSetItems.def()
    }
}

impl Related<super::booking_menu_set::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingMenuSets.def()
    }
}

// Many-to-many relationship with menu items
impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        super::menu_set_item::Relation::MenuItem.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::menu_set_item::Relation::MenuSet.def().rev())
    }
}

impl From<Model> for models::menu::MenuSet {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
