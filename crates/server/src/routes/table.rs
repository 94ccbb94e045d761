use crate::{
    auth::AuthUser,
    dtos::{
        common::{ErrorResponse, IdResponse, SuccessResponse},
        table::{AvailabilityQuery, TableRequest, TableTypeRequest},
    },
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use database::services::table::TableService;
use models::{
    availability::SlotAvailability,
    table::{Table, TableType, TableTypeInfo},
    user::Role,
};
use std::str::FromStr;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_tables, create_table))
        .routes(routes!(get_table_by_id, update_table, delete_table))
        .routes(routes!(get_table_by_num_table))
        .routes(routes!(get_available_tables))
        .routes(routes!(list_table_types))
        .routes(routes!(update_table_type))
}

/// All tables ordered by number, with seat counts
#[utoipa::path(
    get,
    path = "/tables",
    responses(
        (status = 200, description = "Tables", body = Vec<Table>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Tables"
)]
pub async fn get_tables(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Table>>> {
    auth.require(&[Role::User])?;
    Ok(Json(TableService::get_tables(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/tables",
    request_body = TableRequest,
    responses(
        (status = 201, description = "Table created", body = IdResponse),
        (status = 400, description = "Table number must be positive", body = ErrorResponse),
        (status = 403, description = "Requires manager", body = ErrorResponse),
        (status = 409, description = "Table number in use", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Tables"
)]
pub async fn create_table(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<TableRequest>,
) -> ApiResult<(StatusCode, Json<IdResponse>)> {
    auth.require(&[Role::Manager])?;
    let id = TableService::create_table(&state.db, body.num_table, body.table_type).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

#[utoipa::path(
    get,
    path = "/tables/{id}",
    params(("id" = String, Path, description = "Table ID")),
    responses(
        (status = 200, description = "Table found", body = Table),
        (status = 404, description = "Table not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Tables"
)]
pub async fn get_table_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<Table>> {
    auth.require(&[Role::User])?;
    Ok(Json(TableService::get_table_by_id(&state.db, &id).await?))
}

#[utoipa::path(
    put,
    path = "/tables/{id}",
    params(("id" = String, Path, description = "Table ID")),
    request_body = TableRequest,
    responses(
        (status = 200, description = "Table updated", body = SuccessResponse),
        (status = 404, description = "Table not found", body = ErrorResponse),
        (status = 409, description = "Table number in use", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Tables"
)]
pub async fn update_table(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<TableRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    auth.require(&[Role::Manager])?;
    TableService::update_table(&state.db, &id, body.num_table, body.table_type).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/tables/{id}",
    params(("id" = String, Path, description = "Table ID")),
    responses(
        (status = 200, description = "Table deleted", body = SuccessResponse),
        (status = 400, description = "Table is referenced by a booking", body = ErrorResponse),
        (status = 404, description = "Table not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Tables"
)]
pub async fn delete_table(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<SuccessResponse>> {
    auth.require(&[Role::Manager])?;
    TableService::delete_table(&state.db, &id).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    get,
    path = "/tables/number/{num_table}",
    params(("num_table" = i32, Path, description = "Table number")),
    responses(
        (status = 200, description = "Table found", body = Table),
        (status = 404, description = "No table with this number", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Tables"
)]
pub async fn get_table_by_num_table(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(num_table): ApiPath<i32>,
) -> ApiResult<Json<Table>> {
    auth.require(&[Role::User])?;
    Ok(Json(
        TableService::get_table_by_num_table(&state.db, num_table).await?,
    ))
}

/// Free tables for every hourly slot of a day
#[utoipa::path(
    get,
    path = "/tables/available",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Free tables per slot, earliest slot first", body = Vec<SlotAvailability>),
        (status = 400, description = "Unparsable date", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Tables"
)]
pub async fn get_available_tables(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> ApiResult<Json<Vec<SlotAvailability>>> {
    auth.require(&[Role::User])?;
    Ok(Json(
        TableService::get_available_tables(&state.db, &query.date).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/table-types",
    responses(
        (status = 200, description = "Seat count per table type", body = Vec<TableTypeInfo>)
    ),
    security(("jwt" = [])),
    tag = "Tables"
)]
pub async fn list_table_types(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<TableTypeInfo>>> {
    auth.require(&[Role::User])?;
    Ok(Json(TableService::list_table_types(&state.db).await?))
}

#[utoipa::path(
    put,
    path = "/table-types/{table_type}",
    params(("table_type" = String, Path, description = "STANDARD or LARGE")),
    request_body = TableTypeRequest,
    responses(
        (status = 200, description = "Seat count updated", body = SuccessResponse),
        (status = 400, description = "Unknown type or seat count not positive", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Tables"
)]
pub async fn update_table_type(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(table_type): ApiPath<String>,
    ApiJson(body): ApiJson<TableTypeRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    auth.require(&[Role::Manager])?;
    let table_type = TableType::from_str(&table_type)
        .map_err(|_| ApiError::InvalidArgument(format!("unknown table type {table_type:?}")))?;

    TableService::update_table_type(&state.db, table_type, body.seat_count).await?;
    Ok(Json(SuccessResponse::ok()))
}
