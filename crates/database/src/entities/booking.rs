use models::booking::BookingStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_name: String,
    pub company_name: Option<String>,
    pub booking_date_time: DateTimeWithTimeZone, // always stored as Asia/Bangkok
    pub phone_number: String,
    pub num_children: i32,
    pub num_adults: i32,
    pub num_tables: i32,
    #[sea_orm(column_type = "Double")]
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking_table::Entity")]
    BookingTables,
    #[sea_orm(has_many = "super::booking_menu_set::Entity")]
    BookingMenuSets,
    #[sea_orm(has_many = "super::booking_menu_item::Entity")]
    BookingMenuItems,
}

impl Related<super::booking_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingTables.def()
    }
}

impl Related<super::booking_menu_set::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingMenuSets.def()
    }
}

impl Related<super::booking_menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingMenuItems.def()
    }
}

// Many-to-many relationship with tables
impl Related<super::dining_table::Entity> for Entity {
    fn to() -> RelationDef {
        super::booking_table::Relation::DiningTable.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::booking_table::Relation::Booking.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
