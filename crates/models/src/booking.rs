use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};
use uuid::Uuid;

use crate::{menu::MenuCategory, table::TableType};

#[cfg(feature = "database")]
use sea_orm::DeriveActiveEnum;

/// Lifecycle state of a booking
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "database", derive(DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[cfg_attr(feature = "database", sea_orm(string_value = "CONFIRMED"))]
    Confirmed,
    #[cfg_attr(feature = "database", sea_orm(string_value = "CANCELLED"))]
    Cancelled,
    #[cfg_attr(feature = "database", sea_orm(string_value = "COMPLETED"))]
    Completed,
}

impl BookingStatus {
    /// Statuses that no longer hold their tables
    pub const INACTIVE: [BookingStatus; 2] = [BookingStatus::Cancelled, BookingStatus::Completed];

    /// Active bookings hold their tables for the slot they fall in
    pub fn is_active(self) -> bool {
        !Self::INACTIVE.contains(&self)
    }
}

/// A fully reconstructed booking with all of its ordered children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Booking {
    pub booking_id: Uuid,
    pub customer_name: String,
    pub company_name: Option<String>,
    pub booking_date_time: DateTime<FixedOffset>,
    pub phone_number: String,
    pub num_children: i32,
    pub num_adults: i32,
    pub num_tables: i32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub tables: Vec<BookingTable>,
    pub menu_sets: Vec<BookingMenuSet>,
    pub menu_items: Vec<BookingMenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingTable {
    pub table_id: Uuid,
    pub num_table: Option<i32>,
    pub table_type: Option<TableType>,
    pub seat_count: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingMenuSet {
    pub menu_set_id: Uuid,
    pub menu_set_name: Option<String>,
    pub menu_set_price: Option<f64>,
    pub quantity: i32,
    pub menu_items: Vec<BookingMenuItem>,
}

/// A menu item either ordered on its own (with a quantity) or listed inside a
/// menu set (quantity 0, the set carries the quantity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingMenuItem {
    pub menu_item_id: Uuid,
    pub name_th: Option<String>,
    pub name_en: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<MenuCategory>,
    pub image_url: Option<String>,
    pub quantity: i32,
}

/// A menu set ordered as part of a booking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OrderedMenuSet {
    pub menu_set_id: Uuid,
    pub quantity: i32,
}

/// A menu item ordered on its own as part of a booking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OrderedMenuItem {
    pub menu_item_id: Uuid,
    pub quantity: i32,
}

/// Payload of a create or full-replace update.
///
/// `booking_date_time` is kept as the caller's RFC3339 string; it is parsed
/// and normalized to the canonical zone by the booking service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingRequest {
    pub booking_id: Option<Uuid>,
    pub customer_name: String,
    pub company_name: Option<String>,
    pub booking_date_time: String,
    pub phone_number: String,
    pub num_children: i32,
    pub num_adults: i32,
    pub num_tables: i32,
    pub total_price: f64,
    /// Ignored on create; on update `None` keeps the current status
    pub status: Option<BookingStatus>,
    pub table_ids: Vec<Uuid>,
    pub menu_sets: Vec<OrderedMenuSet>,
    pub menu_items: Vec<OrderedMenuItem>,
}
