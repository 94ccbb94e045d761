use models::menu::MenuCategory;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name_th: String,
    #[sea_orm(unique)]
    pub name_en: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub category: MenuCategory,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::menu_set_item::Entity")]
    MenuSetItems,
    #[sea_orm(has_many = "super::booking_menu_item::Entity")]
    BookingMenuItems,
}

impl Related<super::menu_set_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuSetItems.def()
    }
}

impl Related<super::booking_menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingMenuItems.def()
    }
}

impl From<Model> for models::menu::MenuItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name_th: model.name_th,
            name_en: model.name_en,
            description: model.description,
            price: model.price,
            category: model.category,
            image_url: model.image_url,
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
