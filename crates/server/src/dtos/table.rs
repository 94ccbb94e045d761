use models::table::TableType;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct TableRequest {
    pub num_table: i32,
    pub table_type: TableType,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TableTypeRequest {
    pub seat_count: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
}
