use crate::{
    auth::AuthUser,
    dtos::common::{ErrorResponse, IdResponse, SuccessResponse},
    error::ApiResult,
    extract::{ApiJson, ApiPath},
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use database::services::{query_booking::QueryBookingService, save_booking::SaveBookingService};
use models::{
    booking::{Booking, BookingRequest},
    user::Role,
};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_bookings, create_booking))
        .routes(routes!(get_booking_by_id, update_booking, delete_booking))
}

/// All bookings with their tables and orders, earliest first
#[utoipa::path(
    get,
    path = "/bookings",
    responses(
        (status = 200, description = "Bookings", body = Vec<Booking>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Bookings"
)]
pub async fn get_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Booking>>> {
    auth.require(&[Role::User])?;
    Ok(Json(QueryBookingService::get_booking_details(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking found", body = Booking),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Bookings"
)]
pub async fn get_booking_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<Booking>> {
    auth.require(&[Role::User])?;
    Ok(Json(
        QueryBookingService::get_booking_details_by_id(&state.db, &id).await?,
    ))
}

/// Books tables for a time slot. Fails with 409 when a requested table is
/// already held by an active booking in the same hour.
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = IdResponse),
        (status = 400, description = "Invalid booking", body = ErrorResponse),
        (status = 404, description = "Unknown table", body = ErrorResponse),
        (status = 409, description = "Table already booked for this slot", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<BookingRequest>,
) -> ApiResult<(StatusCode, Json<IdResponse>)> {
    auth.require(&[Role::User])?;
    let id = SaveBookingService::create_booking(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// Replaces a booking's fields and all of its tables and orders
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    params(("id" = String, Path, description = "Booking ID")),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = SuccessResponse),
        (status = 400, description = "Invalid booking", body = ErrorResponse),
        (status = 404, description = "Booking or table not found", body = ErrorResponse),
        (status = 409, description = "Table already booked for this slot", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Bookings"
)]
pub async fn update_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<BookingRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    auth.require(&[Role::User])?;
    SaveBookingService::update_booking(&state.db, &id, body).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking deleted", body = SuccessResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Bookings"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<SuccessResponse>> {
    auth.require(&[Role::User])?;
    SaveBookingService::delete_booking(&state.db, &id).await?;
    Ok(Json(SuccessResponse::ok()))
}
