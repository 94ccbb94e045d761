use crate::state::AppState;
use utoipa_axum::{router::OpenApiRouter, routes};

pub mod auth;
pub mod booking;
pub mod dashboard;
pub mod health;
pub mod menu;
pub mod table;
pub mod user;

/// Every endpoint, with its OpenAPI description
pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health::health))
        .merge(auth::router())
        .merge(booking::router())
        .merge(table::router())
        .merge(menu::router())
        .merge(user::router())
        .merge(dashboard::router())
}
