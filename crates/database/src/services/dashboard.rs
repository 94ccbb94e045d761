use crate::error::{ServiceError, ServiceResult};
use log::info;
use models::dashboard::{
    BestSellers, DailySummary, MonthlyBookingAndCustomers, MonthlySales, TopMenuItem, TopMenuSet,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};

// Every date comparison happens in the restaurant's zone, not the server's

const DAILY_SUMMARY_SQL: &str = r#"
SELECT
    COALESCE(SUM(b.total_price), 0)::double precision AS daily_sales,
    COUNT(b.id)::bigint AS daily_bookings,
    COALESCE(SUM(b.num_children + b.num_adults), 0)::bigint AS daily_customers,
    (SELECT COUNT(*) FROM users)::bigint AS total_users
FROM bookings b
WHERE (b.booking_date_time AT TIME ZONE 'Asia/Bangkok')::date
    = (now() AT TIME ZONE 'Asia/Bangkok')::date
"#;

const MONTHLY_SALES_SQL: &str = r#"
WITH months AS (
    SELECT generate_series(1, 12) AS month
)
SELECT
    months.month::int AS month,
    COALESCE(SUM(b.total_price), 0)::double precision AS total_sales
FROM months
LEFT JOIN bookings b
    ON EXTRACT(MONTH FROM b.booking_date_time AT TIME ZONE 'Asia/Bangkok') = months.month
    AND EXTRACT(YEAR FROM b.booking_date_time AT TIME ZONE 'Asia/Bangkok')
        = EXTRACT(YEAR FROM now() AT TIME ZONE 'Asia/Bangkok')
GROUP BY months.month
ORDER BY months.month
"#;

const MONTHLY_BOOKINGS_SQL: &str = r#"
WITH months AS (
    SELECT generate_series(1, 12) AS month
)
SELECT
    months.month::int AS month,
    COUNT(b.id)::bigint AS total_bookings,
    COALESCE(SUM(b.num_children + b.num_adults), 0)::bigint AS total_customers
FROM months
LEFT JOIN bookings b
    ON EXTRACT(MONTH FROM b.booking_date_time AT TIME ZONE 'Asia/Bangkok') = months.month
    AND EXTRACT(YEAR FROM b.booking_date_time AT TIME ZONE 'Asia/Bangkok')
        = EXTRACT(YEAR FROM now() AT TIME ZONE 'Asia/Bangkok')
GROUP BY months.month
ORDER BY months.month
"#;

const TOP_MENU_SETS_SQL: &str = r#"
SELECT
    ms.name AS menu_set_name,
    SUM(bms.quantity)::bigint AS total_quantity_sold
FROM booking_menu_sets bms
JOIN menu_sets ms ON ms.id = bms.menu_set_id
GROUP BY ms.name
ORDER BY total_quantity_sold DESC, ms.name
LIMIT 5
"#;

const TOP_MENU_ITEMS_SQL: &str = r#"
SELECT
    mi.name_th,
    mi.name_en,
    mi.image_url,
    SUM(bmi.quantity)::bigint AS total_quantity_sold
FROM booking_menu_items bmi
JOIN menu_items mi ON mi.id = bmi.menu_item_id
GROUP BY mi.name_th, mi.name_en, mi.image_url
ORDER BY total_quantity_sold DESC, mi.name_en
LIMIT 5
"#;

/// Read-only reports over bookings and the catalog
pub struct DashboardService;

impl DashboardService {
    pub async fn get_daily_summary(db: &DatabaseConnection) -> ServiceResult<DailySummary> {
        DailySummary::find_by_statement(Self::statement(DAILY_SUMMARY_SQL))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::Internal("daily summary returned no row".to_string()))
    }

    /// Sales per month of the current year, months without bookings as 0
    pub async fn get_monthly_sales(db: &DatabaseConnection) -> ServiceResult<Vec<MonthlySales>> {
        let sales = MonthlySales::find_by_statement(Self::statement(MONTHLY_SALES_SQL))
            .all(db)
            .await?;
        info!("Fetched monthly sales");
        Ok(sales)
    }

    pub async fn get_monthly_booking_and_customers(
        db: &DatabaseConnection,
    ) -> ServiceResult<Vec<MonthlyBookingAndCustomers>> {
        let data =
            MonthlyBookingAndCustomers::find_by_statement(Self::statement(MONTHLY_BOOKINGS_SQL))
                .all(db)
                .await?;
        info!("Fetched monthly bookings and customers");
        Ok(data)
    }

    pub async fn get_best_sellers(db: &DatabaseConnection) -> ServiceResult<BestSellers> {
        let top_menu_sets = TopMenuSet::find_by_statement(Self::statement(TOP_MENU_SETS_SQL))
            .all(db)
            .await?;
        let top_a_la_carte = TopMenuItem::find_by_statement(Self::statement(TOP_MENU_ITEMS_SQL))
            .all(db)
            .await?;

        info!("Fetched best sellers");
        Ok(BestSellers {
            top_menu_sets,
            top_a_la_carte,
        })
    }

    fn statement(sql: &str) -> Statement {
        Statement::from_string(DatabaseBackend::Postgres, sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{MockDatabase, Value};
    use std::collections::BTreeMap;

    fn row(pairs: Vec<(&'static str, Value)>) -> BTreeMap<&'static str, Value> {
        pairs.into_iter().collect()
    }

    #[tokio::test]
    async fn test_get_daily_summary() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(vec![
                ("daily_sales", 1250.5f64.into()),
                ("daily_bookings", 3i64.into()),
                ("daily_customers", 11i64.into()),
                ("total_users", 4i64.into()),
            ])]])
            .into_connection();

        let summary = DashboardService::get_daily_summary(&db).await.unwrap();
        assert_eq!(summary.daily_bookings, 3);
        assert_eq!(summary.daily_customers, 11);
    }

    #[tokio::test]
    async fn test_get_monthly_sales_keeps_all_months() {
        let rows: Vec<_> = (1..=12)
            .map(|month: i32| {
                row(vec![
                    ("month", Value::from(month)),
                    ("total_sales", Value::from(if month == 6 { 900.0f64 } else { 0.0 })),
                ])
            })
            .collect();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows])
            .into_connection();

        let sales = DashboardService::get_monthly_sales(&db).await.unwrap();
        assert_eq!(sales.len(), 12);
        assert_eq!(sales[5].month, 6);
        assert_eq!(sales[5].total_sales, 900.0);
        assert_eq!(sales[0].total_sales, 0.0);
    }

    #[tokio::test]
    async fn test_get_best_sellers() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(vec![
                ("menu_set_name", "Family Set".into()),
                ("total_quantity_sold", 7i64.into()),
            ])]])
            .append_query_results([vec![row(vec![
                ("name_th", "ชาเย็น".into()),
                ("name_en", "Thai Iced Tea".into()),
                ("image_url", Option::<String>::None.into()),
                ("total_quantity_sold", 12i64.into()),
            ])]])
            .into_connection();

        let best = DashboardService::get_best_sellers(&db).await.unwrap();
        assert_eq!(best.top_menu_sets[0].total_quantity_sold, 7);
        assert_eq!(best.top_a_la_carte[0].name_en, "Thai Iced Tea");
        assert!(best.top_a_la_carte[0].image_url.is_none());
    }
}
