use crate::{
    entities::{booking, booking_table, dining_table, table_type},
    error::{ServiceError, ServiceResult, parse_id},
};
use log::{info, warn};
use models::{
    availability::{BookedTable, SlotAvailability, group_available_tables},
    booking::BookingStatus,
    table::{Table, TableType, TableTypeInfo},
    time_slot::{TimeSlot, parse_date},
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::collections::HashMap;
use uuid::Uuid;

pub struct TableService;

impl TableService {
    pub async fn create_table(
        db: &DatabaseConnection,
        num_table: i32,
        table_type: TableType,
    ) -> ServiceResult<Uuid> {
        if num_table <= 0 {
            return Err(ServiceError::InvalidArgument(
                "num_table must be greater than 0".to_string(),
            ));
        }
        Self::ensure_number_free(db, num_table, None).await?;

        let id = Uuid::new_v4();
        dining_table::Entity::insert(dining_table::ActiveModel {
            id: Set(id),
            num_table: Set(num_table),
            table_type: Set(table_type),
        })
        .exec_without_returning(db)
        .await?;

        info!("Created table {num_table} ({})", table_type.as_ref());
        Ok(id)
    }

    pub async fn update_table(
        db: &DatabaseConnection,
        id: &str,
        num_table: i32,
        table_type: TableType,
    ) -> ServiceResult<()> {
        let table_id = parse_id(id)?;
        if num_table <= 0 {
            return Err(ServiceError::InvalidArgument(
                "num_table must be greater than 0".to_string(),
            ));
        }

        dining_table::Entity::find_by_id(table_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("table {table_id}")))?;
        Self::ensure_number_free(db, num_table, Some(table_id)).await?;

        dining_table::Entity::update_many()
            .set(dining_table::ActiveModel {
                num_table: Set(num_table),
                table_type: Set(table_type),
                ..Default::default()
            })
            .filter(dining_table::Column::Id.eq(table_id))
            .exec(db)
            .await?;

        info!("Updated table {table_id}");
        Ok(())
    }

    pub async fn delete_table(db: &DatabaseConnection, id: &str) -> ServiceResult<()> {
        let table_id = parse_id(id)?;

        let deleted = dining_table::Entity::delete_by_id(table_id).exec(db).await?;
        if deleted.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("table {table_id}")));
        }

        info!("Deleted table {table_id}");
        Ok(())
    }

    /// All tables ordered by number
    pub async fn get_tables(db: &DatabaseConnection) -> ServiceResult<Vec<Table>> {
        let models = dining_table::Entity::find()
            .order_by_asc(dining_table::Column::NumTable)
            .all(db)
            .await?;
        let seats = Self::seat_counts(db).await?;

        Ok(models
            .into_iter()
            .map(|model| Self::to_table(model, &seats))
            .collect())
    }

    pub async fn get_table_by_id(db: &DatabaseConnection, id: &str) -> ServiceResult<Table> {
        let table_id = parse_id(id)?;
        let model = dining_table::Entity::find_by_id(table_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("table {table_id}")))?;
        let seats = Self::seat_counts(db).await?;

        Ok(Self::to_table(model, &seats))
    }

    pub async fn get_table_by_num_table(
        db: &DatabaseConnection,
        num_table: i32,
    ) -> ServiceResult<Table> {
        let model = dining_table::Entity::find()
            .filter(dining_table::Column::NumTable.eq(num_table))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("table number {num_table}")))?;
        let seats = Self::seat_counts(db).await?;

        Ok(Self::to_table(model, &seats))
    }

    /// Free tables for each bookable slot of `date` (`YYYY-MM-DD`)
    pub async fn get_available_tables(
        db: &DatabaseConnection,
        date: &str,
    ) -> ServiceResult<Vec<SlotAvailability>> {
        let date = parse_date(date)
            .map_err(|e| ServiceError::InvalidArgument(format!("invalid date {date:?}: {e}")))?;

        let slots = TimeSlot::for_date(date);
        let (Some(first), Some(last)) = (slots.first(), slots.last()) else {
            return Ok(Vec::new());
        };

        let tables = Self::get_tables(db).await?;
        let booked: Vec<BookedTable> = booking_table::Entity::find()
            .select_only()
            .column(booking_table::Column::TableId)
            .column_as(booking::Column::BookingDateTime, "booking_date_time")
            .inner_join(booking::Entity)
            .filter(booking::Column::BookingDateTime.gte(first.start()))
            .filter(booking::Column::BookingDateTime.lt(last.end()))
            .filter(booking::Column::Status.is_not_in(BookingStatus::INACTIVE))
            .into_model::<BookedTable>()
            .all(db)
            .await?;

        info!(
            "Availability for {date}: {} table(s), {} booked slot(s)",
            tables.len(),
            booked.len()
        );
        Ok(group_available_tables(date, &tables, &booked))
    }

    pub async fn update_table_type(
        db: &DatabaseConnection,
        table_type: TableType,
        seat_count: i32,
    ) -> ServiceResult<()> {
        if seat_count <= 0 {
            return Err(ServiceError::InvalidArgument(
                "seat_count must be greater than 0".to_string(),
            ));
        }

        let updated = table_type::Entity::update_many()
            .col_expr(
                table_type::Column::SeatCount,
                sea_orm::sea_query::Expr::value(seat_count),
            )
            .filter(table_type::Column::TableType.eq(table_type))
            .exec(db)
            .await?;
        if updated.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "table type {}",
                table_type.as_ref()
            )));
        }

        info!("Table type {} now seats {seat_count}", table_type.as_ref());
        Ok(())
    }

    pub async fn list_table_types(db: &DatabaseConnection) -> ServiceResult<Vec<TableTypeInfo>> {
        let models = table_type::Entity::find()
            .order_by_asc(table_type::Column::TableType)
            .all(db)
            .await?;

        Ok(models
            .into_iter()
            .map(|model| TableTypeInfo {
                table_type: model.table_type,
                seat_count: model.seat_count,
            })
            .collect())
    }

    async fn ensure_number_free(
        db: &DatabaseConnection,
        num_table: i32,
        exclude: Option<Uuid>,
    ) -> ServiceResult<()> {
        let existing = dining_table::Entity::find()
            .filter(dining_table::Column::NumTable.eq(num_table))
            .one(db)
            .await?;

        match existing {
            Some(table) if Some(table.id) != exclude => Err(ServiceError::AlreadyExists(format!(
                "table with number {num_table} already exists"
            ))),
            _ => Ok(()),
        }
    }

    async fn seat_counts(db: &DatabaseConnection) -> ServiceResult<HashMap<TableType, i32>> {
        Ok(table_type::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|model| (model.table_type, model.seat_count))
            .collect())
    }

    fn to_table(model: dining_table::Model, seats: &HashMap<TableType, i32>) -> Table {
        let seat_count = seats
            .get(&model.table_type)
            .copied()
            .unwrap_or_else(|| {
                warn!("No seat count configured for {}", model.table_type.as_ref());
                0
            });

        Table {
            id: model.id,
            num_table: model.num_table,
            table_type: model.table_type,
            seat_count,
        }
    }
}
