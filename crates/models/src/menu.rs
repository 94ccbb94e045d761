use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};
use uuid::Uuid;

#[cfg(feature = "database")]
use sea_orm::DeriveActiveEnum;

/// Menu section an item is listed under
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "database", derive(DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuCategory {
    #[cfg_attr(feature = "database", sea_orm(string_value = "MAIN_COURSE"))]
    MainCourse,
    #[cfg_attr(feature = "database", sea_orm(string_value = "BEVERAGE"))]
    Beverage,
    #[cfg_attr(feature = "database", sea_orm(string_value = "DESSERT"))]
    Dessert,
}

/// A single dish or drink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MenuItem {
    pub id: Uuid,
    pub name_th: String,
    pub name_en: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: MenuCategory,
    pub image_url: Option<String>,
}

/// A bundle of menu items sold for one price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MenuSet {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

/// Fields accepted when creating or replacing a menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MenuItemInput {
    pub name_th: String,
    pub name_en: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: MenuCategory,
    pub image_url: Option<String>,
}

impl MenuItemInput {
    /// Checks the fields that the schema cannot enforce on its own
    pub fn validate(&self) -> Result<(), String> {
        if self.name_th.trim().is_empty() || self.name_en.trim().is_empty() {
            return Err("name_th and name_en must be provided".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("invalid price: {}", self.price));
        }
        Ok(())
    }
}

/// One row of the menu set ↔ menu item association, denormalized for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
pub struct MenuSetItemDetails {
    pub menu_set_id: Uuid,
    pub menu_item_id: Uuid,
    pub menu_set_name: String,
    pub menu_set_price: f64,
    pub menu_name_th: String,
    pub menu_name_en: String,
    pub menu_price: f64,
    pub menu_category: MenuCategory,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> MenuItemInput {
        MenuItemInput {
            name_th: "ต้มยำกุ้ง".to_string(),
            name_en: "Tom Yum Goong".to_string(),
            description: None,
            price: 180.0,
            category: MenuCategory::MainCourse,
            image_url: None,
        }
    }

    #[test]
    fn test_menu_item_input_validation() {
        assert!(input().validate().is_ok());

        let mut blank_name = input();
        blank_name.name_en = "  ".to_string();
        assert!(blank_name.validate().is_err());

        let mut negative = input();
        negative.price = -1.0;
        assert!(negative.validate().is_err());

        let mut nan = input();
        nan.price = f64::NAN;
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_menu_category_wire_names() {
        assert_eq!(MenuCategory::MainCourse.as_ref(), "MAIN_COURSE");
        assert_eq!(
            serde_json::to_string(&MenuCategory::Beverage).unwrap(),
            "\"BEVERAGE\""
        );
    }
}
