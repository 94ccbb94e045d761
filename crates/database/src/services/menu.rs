use crate::{
    entities::{menu_item, menu_set, menu_set_item},
    error::{ServiceError, ServiceResult, parse_id},
};
use log::info;
use models::menu::{MenuItem, MenuItemInput, MenuSet, MenuSetItemDetails};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, Statement, TransactionTrait, Value,
};
use std::collections::HashSet;
use uuid::Uuid;

const MENU_SET_ITEMS_SQL: &str = r#"
SELECT
    msi.menu_set_id,
    msi.menu_item_id,
    ms.name AS menu_set_name,
    ms.price AS menu_set_price,
    mi.name_th AS menu_name_th,
    mi.name_en AS menu_name_en,
    mi.price AS menu_price,
    mi.category AS menu_category,
    mi.image_url
FROM menu_set_items msi
JOIN menu_sets ms ON ms.id = msi.menu_set_id
JOIN menu_items mi ON mi.id = msi.menu_item_id
"#;

pub struct MenuService;

impl MenuService {
    pub async fn create_menu_item(
        db: &DatabaseConnection,
        input: MenuItemInput,
    ) -> ServiceResult<Uuid> {
        input.validate().map_err(ServiceError::InvalidArgument)?;

        let id = Uuid::new_v4();
        menu_item::Entity::insert(Self::item_model(id, input))
            .exec_without_returning(db)
            .await?;

        info!("Created menu item {id}");
        Ok(id)
    }

    pub async fn update_menu_item(
        db: &DatabaseConnection,
        id: &str,
        input: MenuItemInput,
    ) -> ServiceResult<()> {
        let item_id = parse_id(id)?;
        input.validate().map_err(ServiceError::InvalidArgument)?;

        let mut model = Self::item_model(item_id, input);
        model.id = sea_orm::ActiveValue::NotSet;
        let updated = menu_item::Entity::update_many()
            .set(model)
            .filter(menu_item::Column::Id.eq(item_id))
            .exec(db)
            .await?;
        if updated.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("menu item {item_id}")));
        }

        info!("Updated menu item {item_id}");
        Ok(())
    }

    pub async fn delete_menu_item(db: &DatabaseConnection, id: &str) -> ServiceResult<()> {
        let item_id = parse_id(id)?;

        let deleted = menu_item::Entity::delete_by_id(item_id).exec(db).await?;
        if deleted.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("menu item {item_id}")));
        }

        info!("Deleted menu item {item_id}");
        Ok(())
    }

    pub async fn get_menu_items(db: &DatabaseConnection) -> ServiceResult<Vec<MenuItem>> {
        Ok(menu_item::Entity::find()
            .order_by_asc(menu_item::Column::Category)
            .order_by_asc(menu_item::Column::NameEn)
            .all(db)
            .await?
            .into_iter()
            .map(MenuItem::from)
            .collect())
    }

    pub async fn get_menu_item_by_id(db: &DatabaseConnection, id: &str) -> ServiceResult<MenuItem> {
        let item_id = parse_id(id)?;
        menu_item::Entity::find_by_id(item_id)
            .one(db)
            .await?
            .map(MenuItem::from)
            .ok_or_else(|| ServiceError::NotFound(format!("menu item {item_id}")))
    }

    pub async fn create_menu_set(
        db: &DatabaseConnection,
        name: &str,
        price: f64,
    ) -> ServiceResult<Uuid> {
        Self::validate_menu_set(name, price)?;

        let id = Uuid::new_v4();
        menu_set::Entity::insert(menu_set::ActiveModel {
            id: Set(id),
            name: Set(name.trim().to_string()),
            price: Set(price),
        })
        .exec_without_returning(db)
        .await?;

        info!("Created menu set {id}");
        Ok(id)
    }

    pub async fn update_menu_set(
        db: &DatabaseConnection,
        id: &str,
        name: &str,
        price: f64,
    ) -> ServiceResult<()> {
        let set_id = parse_id(id)?;
        Self::validate_menu_set(name, price)?;

        let updated = menu_set::Entity::update_many()
            .set(menu_set::ActiveModel {
                name: Set(name.trim().to_string()),
                price: Set(price),
                ..Default::default()
            })
            .filter(menu_set::Column::Id.eq(set_id))
            .exec(db)
            .await?;
        if updated.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("menu set {set_id}")));
        }

        info!("Updated menu set {set_id}");
        Ok(())
    }

    pub async fn delete_menu_set(db: &DatabaseConnection, id: &str) -> ServiceResult<()> {
        let set_id = parse_id(id)?;

        let deleted = menu_set::Entity::delete_by_id(set_id).exec(db).await?;
        if deleted.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("menu set {set_id}")));
        }

        info!("Deleted menu set {set_id}");
        Ok(())
    }

    pub async fn get_menu_sets(db: &DatabaseConnection) -> ServiceResult<Vec<MenuSet>> {
        Ok(menu_set::Entity::find()
            .order_by_asc(menu_set::Column::Name)
            .all(db)
            .await?
            .into_iter()
            .map(MenuSet::from)
            .collect())
    }

    pub async fn get_menu_set_by_id(db: &DatabaseConnection, id: &str) -> ServiceResult<MenuSet> {
        let set_id = parse_id(id)?;
        menu_set::Entity::find_by_id(set_id)
            .one(db)
            .await?
            .map(MenuSet::from)
            .ok_or_else(|| ServiceError::NotFound(format!("menu set {set_id}")))
    }

    /// Adds menu items to a menu set
    pub async fn create_menu_set_items(
        db: &DatabaseConnection,
        menu_set_id: &str,
        menu_item_ids: &[Uuid],
    ) -> ServiceResult<()> {
        let set_id = parse_id(menu_set_id)?;
        Self::validate_item_ids(menu_item_ids)?;

        let txn = db.begin().await?;
        Self::ensure_menu_set_exists(&txn, set_id).await?;
        Self::insert_menu_set_items(&txn, set_id, menu_item_ids).await?;
        txn.commit().await?;

        info!("Added {} item(s) to menu set {set_id}", menu_item_ids.len());
        Ok(())
    }

    /// Replaces the full item list of a menu set
    pub async fn update_menu_set_items(
        db: &DatabaseConnection,
        menu_set_id: &str,
        menu_item_ids: &[Uuid],
    ) -> ServiceResult<()> {
        let set_id = parse_id(menu_set_id)?;
        Self::validate_item_ids(menu_item_ids)?;

        let txn = db.begin().await?;
        Self::ensure_menu_set_exists(&txn, set_id).await?;
        menu_set_item::Entity::delete_many()
            .filter(menu_set_item::Column::MenuSetId.eq(set_id))
            .exec(&txn)
            .await?;
        Self::insert_menu_set_items(&txn, set_id, menu_item_ids).await?;
        txn.commit().await?;

        info!("Menu set {set_id} now has {} item(s)", menu_item_ids.len());
        Ok(())
    }

    /// Removes every item from a menu set
    pub async fn delete_menu_set_items(
        db: &DatabaseConnection,
        menu_set_id: &str,
    ) -> ServiceResult<()> {
        let set_id = parse_id(menu_set_id)?;

        let deleted = menu_set_item::Entity::delete_many()
            .filter(menu_set_item::Column::MenuSetId.eq(set_id))
            .exec(db)
            .await?;

        info!(
            "Removed {} item(s) from menu set {set_id}",
            deleted.rows_affected
        );
        Ok(())
    }

    pub async fn get_menu_set_items(
        db: &DatabaseConnection,
    ) -> ServiceResult<Vec<MenuSetItemDetails>> {
        let sql = format!("{MENU_SET_ITEMS_SQL}ORDER BY ms.name, mi.name_en");
        Self::fetch_menu_set_items(db, sql, Vec::new()).await
    }

    pub async fn get_menu_set_items_by_menu_set_id(
        db: &DatabaseConnection,
        menu_set_id: &str,
    ) -> ServiceResult<Vec<MenuSetItemDetails>> {
        let set_id = parse_id(menu_set_id)?;
        let sql = format!("{MENU_SET_ITEMS_SQL}WHERE msi.menu_set_id = $1\nORDER BY mi.name_en");
        Self::fetch_menu_set_items(db, sql, vec![set_id.into()]).await
    }

    fn item_model(id: Uuid, input: MenuItemInput) -> menu_item::ActiveModel {
        menu_item::ActiveModel {
            id: Set(id),
            name_th: Set(input.name_th.trim().to_string()),
            name_en: Set(input.name_en.trim().to_string()),
            description: Set(input.description),
            price: Set(input.price),
            category: Set(input.category),
            image_url: Set(input.image_url.filter(|url| !url.trim().is_empty())),
        }
    }

    fn validate_menu_set(name: &str, price: f64) -> ServiceResult<()> {
        if name.trim().is_empty() {
            return Err(ServiceError::InvalidArgument(
                "name must be provided".to_string(),
            ));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(ServiceError::InvalidArgument(format!(
                "invalid price: {price}"
            )));
        }
        Ok(())
    }

    fn validate_item_ids(menu_item_ids: &[Uuid]) -> ServiceResult<()> {
        if menu_item_ids.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "at least one menu item id must be provided".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = menu_item_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(ServiceError::InvalidArgument(format!(
                "menu item {dup} is listed more than once"
            )));
        }
        Ok(())
    }

    async fn ensure_menu_set_exists(txn: &DatabaseTransaction, set_id: Uuid) -> ServiceResult<()> {
        menu_set::Entity::find_by_id(set_id)
            .one(txn)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(format!("menu set {set_id}")))
    }

    async fn insert_menu_set_items(
        txn: &DatabaseTransaction,
        set_id: Uuid,
        menu_item_ids: &[Uuid],
    ) -> ServiceResult<()> {
        let rows = menu_item_ids
            .iter()
            .map(|item_id| menu_set_item::ActiveModel {
                menu_set_id: Set(set_id),
                menu_item_id: Set(*item_id),
            });
        menu_set_item::Entity::insert_many(rows)
            .exec_without_returning(txn)
            .await?;
        Ok(())
    }

    async fn fetch_menu_set_items(
        db: &DatabaseConnection,
        sql: String,
        values: Vec<Value>,
    ) -> ServiceResult<Vec<MenuSetItemDetails>> {
        let stmt = Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, values);
        Ok(MenuSetItemDetails::find_by_statement(stmt).all(db).await?)
    }
}
