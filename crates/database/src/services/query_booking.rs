use crate::error::{ServiceError, ServiceResult, parse_id};
use log::{debug, info};
use models::{
    booking::Booking,
    booking_row::{BookingRow, map_booking_details},
};
use sea_orm::{DatabaseBackend, DatabaseConnection, FromQueryResult, Statement, Value};

/// Every booking joined with its tables, menu sets (with their items) and
/// standalone menu items. One row per combination.
const BOOKING_DETAILS_SQL: &str = r#"
SELECT
    b.id AS booking_id,
    b.customer_name,
    b.company_name,
    b.booking_date_time,
    b.phone_number,
    b.num_children,
    b.num_adults,
    b.num_tables,
    b.total_price,
    b.status,
    bt.table_id,
    t.num_table,
    t.type AS table_type,
    tt.seat_count,
    bms.menu_set_id,
    ms.name AS menu_set_name,
    ms.price AS menu_set_price,
    bms.quantity AS menu_set_quantity,
    mi.id AS menu_item_id,
    mi.name_th AS menu_item_name_th,
    mi.name_en AS menu_item_name_en,
    mi.description AS menu_item_description,
    mi.price AS menu_item_price,
    mi.category AS menu_item_category,
    mi.image_url AS menu_item_image_url,
    bmi.menu_item_id AS separate_menu_item_id,
    smi.name_th AS separate_menu_item_name_th,
    smi.name_en AS separate_menu_item_name_en,
    smi.description AS separate_menu_item_description,
    smi.price AS separate_menu_item_price,
    smi.category AS separate_menu_item_category,
    smi.image_url AS separate_menu_item_image_url,
    bmi.quantity AS separate_menu_item_quantity
FROM bookings b
LEFT JOIN booking_tables bt ON bt.booking_id = b.id
LEFT JOIN tables t ON t.id = bt.table_id
LEFT JOIN table_types tt ON tt.type = t.type
LEFT JOIN booking_menu_sets bms ON bms.booking_id = b.id
LEFT JOIN menu_sets ms ON ms.id = bms.menu_set_id
LEFT JOIN menu_set_items msi ON msi.menu_set_id = bms.menu_set_id
LEFT JOIN menu_items mi ON mi.id = msi.menu_item_id
LEFT JOIN booking_menu_items bmi ON bmi.booking_id = b.id
LEFT JOIN menu_items smi ON smi.id = bmi.menu_item_id
"#;

/// Keeps each booking's rows together and children in their stored order
const BOOKING_DETAILS_ORDER: &str =
    "ORDER BY b.booking_date_time, b.id, bt.position, bms.position, mi.name_en, bmi.position";

pub struct QueryBookingService;

impl QueryBookingService {
    /// All bookings, earliest first. An empty list is a valid result.
    pub async fn get_booking_details(db: &DatabaseConnection) -> ServiceResult<Vec<Booking>> {
        let sql = format!("{BOOKING_DETAILS_SQL}{BOOKING_DETAILS_ORDER}");
        let rows = Self::fetch_rows(db, sql, Vec::new()).await?;
        let bookings = map_booking_details(rows);

        info!("Fetched {} booking(s)", bookings.len());
        Ok(bookings)
    }

    pub async fn get_booking_details_by_id(
        db: &DatabaseConnection,
        id: &str,
    ) -> ServiceResult<Booking> {
        let booking_id = parse_id(id)?;

        let sql = format!("{BOOKING_DETAILS_SQL}WHERE b.id = $1\n{BOOKING_DETAILS_ORDER}");
        let rows = Self::fetch_rows(db, sql, vec![booking_id.into()]).await?;

        map_booking_details(rows)
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound(format!("booking {booking_id}")))
    }

    async fn fetch_rows(
        db: &DatabaseConnection,
        sql: String,
        values: Vec<Value>,
    ) -> ServiceResult<Vec<BookingRow>> {
        let stmt = Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, values);
        let rows = BookingRow::find_by_statement(stmt).all(db).await?;
        debug!("Booking details join returned {} row(s)", rows.len());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::time_slot::parse_booking_date_time;
    use sea_orm::MockDatabase;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    /// A join row with only the booking columns filled in
    fn bare_row(booking_id: Uuid) -> BTreeMap<&'static str, Value> {
        let at = parse_booking_date_time("2025-06-01T18:00:00+07:00").unwrap();
        let mut row: BTreeMap<&'static str, Value> = BTreeMap::new();
        row.insert("booking_id", booking_id.into());
        row.insert("customer_name", "Somchai".into());
        row.insert("company_name", Option::<String>::None.into());
        row.insert("booking_date_time", at.into());
        row.insert("phone_number", "0812345678".into());
        row.insert("num_children", 0i32.into());
        row.insert("num_adults", 2i32.into());
        row.insert("num_tables", 1i32.into());
        row.insert("total_price", 450.0f64.into());
        row.insert("status", "CONFIRMED".into());

        for key in ["table_id", "menu_set_id", "menu_item_id", "separate_menu_item_id"] {
            row.insert(key, Option::<Uuid>::None.into());
        }
        for key in ["num_table", "seat_count", "menu_set_quantity", "separate_menu_item_quantity"] {
            row.insert(key, Option::<i32>::None.into());
        }
        for key in ["menu_set_price", "menu_item_price", "separate_menu_item_price"] {
            row.insert(key, Option::<f64>::None.into());
        }
        for key in [
            "table_type",
            "menu_set_name",
            "menu_item_name_th",
            "menu_item_name_en",
            "menu_item_description",
            "menu_item_category",
            "menu_item_image_url",
            "separate_menu_item_name_th",
            "separate_menu_item_name_en",
            "separate_menu_item_description",
            "separate_menu_item_category",
            "separate_menu_item_image_url",
        ] {
            row.insert(key, Option::<String>::None.into());
        }
        row
    }

    fn with_table(
        mut row: BTreeMap<&'static str, Value>,
        table_id: Uuid,
        number: i32,
    ) -> BTreeMap<&'static str, Value> {
        row.insert("table_id", Some(table_id).into());
        row.insert("num_table", Some(number).into());
        row.insert("table_type", Some("STANDARD".to_string()).into());
        row.insert("seat_count", Some(4i32).into());
        row
    }

    #[tokio::test]
    async fn test_get_booking_details_by_id_nests_rows() {
        let id = Uuid::new_v4();
        let (t1, t2) = (Uuid::from_u128(1), Uuid::from_u128(2));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                with_table(bare_row(id), t1, 1),
                with_table(bare_row(id), t2, 2),
            ]])
            .into_connection();

        let booking = QueryBookingService::get_booking_details_by_id(&db, &id.to_string())
            .await
            .unwrap();

        assert_eq!(booking.booking_id, id);
        assert_eq!(booking.booking_date_time.to_rfc3339(), "2025-06-01T18:00:00+07:00");
        let numbers: Vec<_> = booking.tables.iter().map(|t| t.num_table).collect();
        assert_eq!(numbers, vec![Some(1), Some(2)]);
        assert!(booking.menu_sets.is_empty());

        let statements: Vec<Statement> = db
            .into_transaction_log()
            .into_iter()
            .flat_map(|txn| txn.statements().to_vec())
            .collect();
        assert!(statements[0].sql.contains("WHERE b.id = $1"));
    }

    #[tokio::test]
    async fn test_get_booking_details_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()])
            .into_connection();

        let err = QueryBookingService::get_booking_details_by_id(&db, &Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = QueryBookingService::get_booking_details_by_id(&db, "42")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_get_booking_details_empty_is_ok() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()])
            .into_connection();

        let bookings = QueryBookingService::get_booking_details(&db).await.unwrap();
        assert!(bookings.is_empty());
    }
}
