use crate::{
    dtos::{
        auth::{CredentialsRequest, LoginResponse, RegisterResponse},
        common::ErrorResponse,
    },
    error::ApiResult,
    extract::ApiJson,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::user::UserService;
use log::info;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
}

/// Creates an account with the `user` role
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Missing username or password too short", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let user = UserService::register(&state.db, &body.username, &body.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: user.username,
        }),
    ))
}

/// Exchanges credentials for a bearer token valid for 72 hours
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed token", body = LoginResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = UserService::authenticate(&state.db, &body.username, &body.password).await?;
    let token = state.jwt.create_token(&user)?;

    info!("{} logged in", user.username);
    Ok(Json(LoginResponse { token }))
}
