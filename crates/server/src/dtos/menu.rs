use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct MenuSetRequest {
    pub name: String,
    pub price: f64,
}

/// Menu items that make up a set, replacing any previous list
#[derive(Debug, Deserialize, ToSchema)]
pub struct MenuSetItemsRequest {
    pub menu_item_ids: Vec<Uuid>,
}
