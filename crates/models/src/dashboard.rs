use serde::{Deserialize, Serialize};

/// Today's figures in the canonical zone, plus the number of accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
pub struct DailySummary {
    pub daily_sales: f64,
    pub daily_bookings: i64,
    pub daily_customers: i64,
    pub total_users: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
pub struct MonthlySales {
    /// 1 to 12
    pub month: i32,
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
pub struct MonthlyBookingAndCustomers {
    pub month: i32,
    pub total_bookings: i64,
    pub total_customers: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
pub struct TopMenuSet {
    pub menu_set_name: String,
    pub total_quantity_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
pub struct TopMenuItem {
    pub name_th: String,
    pub name_en: String,
    pub image_url: Option<String>,
    pub total_quantity_sold: i64,
}

/// Top sellers by summed quantity across every booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BestSellers {
    pub top_menu_sets: Vec<TopMenuSet>,
    pub top_a_la_carte: Vec<TopMenuItem>,
}
