use crate::{
    auth::AuthUser,
    dtos::{
        common::{ErrorResponse, IdResponse, SuccessResponse},
        menu::{MenuSetItemsRequest, MenuSetRequest},
    },
    error::ApiResult,
    extract::{ApiJson, ApiPath},
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use database::services::menu::MenuService;
use models::{
    menu::{MenuItem, MenuItemInput, MenuSet, MenuSetItemDetails},
    user::Role,
};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_menu_items, create_menu_item))
        .routes(routes!(get_menu_item_by_id, update_menu_item, delete_menu_item))
        .routes(routes!(get_menu_sets, create_menu_set))
        .routes(routes!(get_menu_set_by_id, update_menu_set, delete_menu_set))
        .routes(routes!(get_menu_set_items))
        .routes(routes!(
            get_menu_set_items_by_menu_set_id,
            create_menu_set_items,
            update_menu_set_items,
            delete_menu_set_items
        ))
}

/// Menu items grouped by category
#[utoipa::path(
    get,
    path = "/menu-items",
    responses(
        (status = 200, description = "Menu items", body = Vec<MenuItem>)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn get_menu_items(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MenuItem>>> {
    auth.require(&[Role::User])?;
    Ok(Json(MenuService::get_menu_items(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/menu-items",
    request_body = MenuItemInput,
    responses(
        (status = 201, description = "Menu item created", body = IdResponse),
        (status = 400, description = "Missing name or negative price", body = ErrorResponse),
        (status = 409, description = "Name already used", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn create_menu_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<MenuItemInput>,
) -> ApiResult<(StatusCode, Json<IdResponse>)> {
    auth.require(&[Role::Manager])?;
    let id = MenuService::create_menu_item(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

#[utoipa::path(
    get,
    path = "/menu-items/{id}",
    params(("id" = String, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Menu item found", body = MenuItem),
        (status = 404, description = "Menu item not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn get_menu_item_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<MenuItem>> {
    auth.require(&[Role::User])?;
    Ok(Json(MenuService::get_menu_item_by_id(&state.db, &id).await?))
}

#[utoipa::path(
    put,
    path = "/menu-items/{id}",
    params(("id" = String, Path, description = "Menu item ID")),
    request_body = MenuItemInput,
    responses(
        (status = 200, description = "Menu item updated", body = SuccessResponse),
        (status = 404, description = "Menu item not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn update_menu_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<MenuItemInput>,
) -> ApiResult<Json<SuccessResponse>> {
    auth.require(&[Role::Manager])?;
    MenuService::update_menu_item(&state.db, &id, body).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/menu-items/{id}",
    params(("id" = String, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Menu item deleted", body = SuccessResponse),
        (status = 404, description = "Menu item not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<SuccessResponse>> {
    auth.require(&[Role::Manager])?;
    MenuService::delete_menu_item(&state.db, &id).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    get,
    path = "/menu-sets",
    responses(
        (status = 200, description = "Menu sets", body = Vec<MenuSet>)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn get_menu_sets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MenuSet>>> {
    auth.require(&[Role::User])?;
    Ok(Json(MenuService::get_menu_sets(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/menu-sets",
    request_body = MenuSetRequest,
    responses(
        (status = 201, description = "Menu set created", body = IdResponse),
        (status = 409, description = "Name already used", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn create_menu_set(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<MenuSetRequest>,
) -> ApiResult<(StatusCode, Json<IdResponse>)> {
    auth.require(&[Role::Manager])?;
    let id = MenuService::create_menu_set(&state.db, &body.name, body.price).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

#[utoipa::path(
    get,
    path = "/menu-sets/{id}",
    params(("id" = String, Path, description = "Menu set ID")),
    responses(
        (status = 200, description = "Menu set found", body = MenuSet),
        (status = 404, description = "Menu set not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn get_menu_set_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<MenuSet>> {
    auth.require(&[Role::User])?;
    Ok(Json(MenuService::get_menu_set_by_id(&state.db, &id).await?))
}

#[utoipa::path(
    put,
    path = "/menu-sets/{id}",
    params(("id" = String, Path, description = "Menu set ID")),
    request_body = MenuSetRequest,
    responses(
        (status = 200, description = "Menu set updated", body = SuccessResponse),
        (status = 404, description = "Menu set not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn update_menu_set(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<MenuSetRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    auth.require(&[Role::Manager])?;
    MenuService::update_menu_set(&state.db, &id, &body.name, body.price).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/menu-sets/{id}",
    params(("id" = String, Path, description = "Menu set ID")),
    responses(
        (status = 200, description = "Menu set deleted", body = SuccessResponse),
        (status = 404, description = "Menu set not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn delete_menu_set(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<SuccessResponse>> {
    auth.require(&[Role::Manager])?;
    MenuService::delete_menu_set(&state.db, &id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Every menu set with the items it contains, one entry per pair
#[utoipa::path(
    get,
    path = "/menu-set-items",
    responses(
        (status = 200, description = "Menu set contents", body = Vec<MenuSetItemDetails>)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn get_menu_set_items(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MenuSetItemDetails>>> {
    auth.require(&[Role::User])?;
    Ok(Json(MenuService::get_menu_set_items(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/menu-sets/{id}/items",
    params(("id" = String, Path, description = "Menu set ID")),
    responses(
        (status = 200, description = "Items of the set", body = Vec<MenuSetItemDetails>)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn get_menu_set_items_by_menu_set_id(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<Vec<MenuSetItemDetails>>> {
    auth.require(&[Role::User])?;
    Ok(Json(
        MenuService::get_menu_set_items_by_menu_set_id(&state.db, &id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/menu-sets/{id}/items",
    params(("id" = String, Path, description = "Menu set ID")),
    request_body = MenuSetItemsRequest,
    responses(
        (status = 201, description = "Items added to the set", body = SuccessResponse),
        (status = 400, description = "Empty or repeated item list", body = ErrorResponse),
        (status = 404, description = "Menu set not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn create_menu_set_items(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<MenuSetItemsRequest>,
) -> ApiResult<(StatusCode, Json<SuccessResponse>)> {
    auth.require(&[Role::Manager])?;
    MenuService::create_menu_set_items(&state.db, &id, &body.menu_item_ids).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::ok())))
}

/// Replaces the whole item list of a set
#[utoipa::path(
    put,
    path = "/menu-sets/{id}/items",
    params(("id" = String, Path, description = "Menu set ID")),
    request_body = MenuSetItemsRequest,
    responses(
        (status = 200, description = "Set contents replaced", body = SuccessResponse),
        (status = 400, description = "Empty or repeated item list", body = ErrorResponse),
        (status = 404, description = "Menu set not found", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn update_menu_set_items(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<MenuSetItemsRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    auth.require(&[Role::Manager])?;
    MenuService::update_menu_set_items(&state.db, &id, &body.menu_item_ids).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/menu-sets/{id}/items",
    params(("id" = String, Path, description = "Menu set ID")),
    responses(
        (status = 200, description = "Set emptied", body = SuccessResponse)
    ),
    security(("jwt" = [])),
    tag = "Menu"
)]
pub async fn delete_menu_set_items(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<SuccessResponse>> {
    auth.require(&[Role::Manager])?;
    MenuService::delete_menu_set_items(&state.db, &id).await?;
    Ok(Json(SuccessResponse::ok()))
}
