use crate::{
    auth::AuthUser,
    dtos::{
        common::{ErrorResponse, SuccessResponse},
        user::{UpdatePasswordRequest, UpdateRoleRequest},
    },
    error::ApiResult,
    extract::{ApiJson, ApiPath},
    state::AppState,
};
use axum::{
    Json,
    extract::State,
};
use database::services::user::UserService;
use models::user::{Role, User};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_all_users))
        .routes(routes!(get_user, delete_user))
        .routes(routes!(update_user_role))
        .routes(routes!(update_user_password))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All accounts", body = Vec<User>),
        (status = 403, description = "Requires admin", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Users"
)]
pub async fn get_all_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<User>>> {
    auth.require(&[Role::Admin])?;
    Ok(Json(UserService::get_all_users(&state.db).await?))
}

/// Looks an account up by id or username
#[utoipa::path(
    get,
    path = "/users/{identifier}",
    params(("identifier" = String, Path, description = "User ID or username")),
    responses(
        (status = 200, description = "Account found", body = User),
        (status = 404, description = "No such account", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(identifier): ApiPath<String>,
) -> ApiResult<Json<User>> {
    auth.require(&[Role::User])?;
    Ok(Json(UserService::get_user(&state.db, &identifier).await?))
}

#[utoipa::path(
    put,
    path = "/users/{identifier}/role",
    params(("identifier" = String, Path, description = "User ID or username")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = User),
        (status = 404, description = "No such account", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Users"
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(identifier): ApiPath<String>,
    ApiJson(body): ApiJson<UpdateRoleRequest>,
) -> ApiResult<Json<User>> {
    auth.require(&[Role::Admin])?;
    Ok(Json(
        UserService::update_user_role(&state.db, &identifier, body.role).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/users/{identifier}/password",
    params(("identifier" = String, Path, description = "User ID or username")),
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = User),
        (status = 400, description = "Password too short", body = ErrorResponse),
        (status = 404, description = "No such account", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Users"
)]
pub async fn update_user_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(identifier): ApiPath<String>,
    ApiJson(body): ApiJson<UpdatePasswordRequest>,
) -> ApiResult<Json<User>> {
    auth.require(&[Role::Admin])?;
    Ok(Json(
        UserService::update_user_password(&state.db, &identifier, &body.password).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/users/{identifier}",
    params(("identifier" = String, Path, description = "User ID or username")),
    responses(
        (status = 200, description = "Account deleted", body = SuccessResponse),
        (status = 404, description = "No such account", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(identifier): ApiPath<String>,
) -> ApiResult<Json<SuccessResponse>> {
    auth.require(&[Role::Admin])?;
    UserService::delete_user(&state.db, &identifier).await?;
    Ok(Json(SuccessResponse::ok()))
}
