use crate::{auth::AuthUser, dtos::common::ErrorResponse, error::ApiResult, state::AppState};
use axum::{Json, extract::State};
use database::services::dashboard::DashboardService;
use models::{
    dashboard::{BestSellers, DailySummary, MonthlyBookingAndCustomers, MonthlySales},
    user::Role,
};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_daily_summary))
        .routes(routes!(get_monthly_sales))
        .routes(routes!(get_monthly_booking_and_customers))
        .routes(routes!(get_best_sellers))
}

/// Sales, bookings and customers for today in the restaurant's zone
#[utoipa::path(
    get,
    path = "/dashboard/daily-summary",
    responses(
        (status = 200, description = "Today's figures", body = DailySummary),
        (status = 403, description = "Requires admin", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Dashboard"
)]
pub async fn get_daily_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DailySummary>> {
    auth.require(&[Role::Admin])?;
    Ok(Json(DashboardService::get_daily_summary(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/dashboard/monthly-sales",
    responses(
        (status = 200, description = "Twelve months of the current year", body = Vec<MonthlySales>)
    ),
    security(("jwt" = [])),
    tag = "Dashboard"
)]
pub async fn get_monthly_sales(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MonthlySales>>> {
    auth.require(&[Role::Admin])?;
    Ok(Json(DashboardService::get_monthly_sales(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/dashboard/monthly-bookings-customers",
    responses(
        (status = 200, description = "Twelve months of the current year", body = Vec<MonthlyBookingAndCustomers>)
    ),
    security(("jwt" = [])),
    tag = "Dashboard"
)]
pub async fn get_monthly_booking_and_customers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MonthlyBookingAndCustomers>>> {
    auth.require(&[Role::Admin])?;
    Ok(Json(
        DashboardService::get_monthly_booking_and_customers(&state.db).await?,
    ))
}

/// Top five menu sets and à la carte items by quantity sold
#[utoipa::path(
    get,
    path = "/dashboard/best-sellers",
    responses(
        (status = 200, description = "Best sellers", body = BestSellers)
    ),
    security(("jwt" = [])),
    tag = "Dashboard"
)]
pub async fn get_best_sellers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<BestSellers>> {
    auth.require(&[Role::Admin])?;
    Ok(Json(DashboardService::get_best_sellers(&state.db).await?))
}
