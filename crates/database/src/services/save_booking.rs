use crate::{
    entities::{booking, booking_menu_item, booking_menu_set, booking_table, dining_table},
    error::{ServiceError, ServiceResult, parse_id},
};
use chrono::{DateTime, FixedOffset, Utc};
use log::{error, info, warn};
use models::{
    availability::BookedTable,
    booking::{BookingRequest, BookingStatus, OrderedMenuItem, OrderedMenuSet},
    time_slot::{OPENING_HOUR, SLOTS_PER_DAY, TimeSlot, parse_booking_date_time, to_canonical},
};
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter, QuerySelect,
    QueryTrait, TransactionTrait,
};
use std::collections::HashSet;
use uuid::Uuid;

/// A booking request that passed validation, with its time canonicalized
#[derive(Debug, Clone)]
struct ValidatedBooking {
    customer_name: String,
    company_name: Option<String>,
    booking_date_time: DateTime<FixedOffset>,
    phone_number: String,
    num_children: i32,
    num_adults: i32,
    num_tables: i32,
    total_price: f64,
    table_ids: Vec<Uuid>,
    menu_sets: Vec<OrderedMenuSet>,
    menu_items: Vec<OrderedMenuItem>,
}

impl ValidatedBooking {
    fn from_request(request: BookingRequest) -> ServiceResult<Self> {
        let invalid = |msg: String| Err(ServiceError::InvalidArgument(msg));

        if request.customer_name.trim().is_empty() {
            return invalid("customer_name is required".to_string());
        }
        if request.booking_date_time.trim().is_empty() {
            return invalid("booking_date_time is required".to_string());
        }
        let booking_date_time =
            parse_booking_date_time(&request.booking_date_time).map_err(|e| {
                ServiceError::InvalidArgument(format!("invalid booking_date_time format: {e}"))
            })?;
        if !TimeSlot::containing(booking_date_time).is_bookable() {
            return invalid(format!(
                "booking_date_time {} is outside opening hours ({OPENING_HOUR}:00 to {}:00)",
                booking_date_time.to_rfc3339(),
                OPENING_HOUR + SLOTS_PER_DAY
            ));
        }
        if request.num_adults < 1 {
            return invalid("num_adults must be at least 1".to_string());
        }
        if request.num_tables < 1 {
            return invalid("num_tables must be at least 1".to_string());
        }
        if request.num_children < 0 {
            return invalid("num_children cannot be negative".to_string());
        }
        if !request.total_price.is_finite() || request.total_price < 0.0 {
            return invalid(format!("invalid total_price: {}", request.total_price));
        }

        if let Some(dup) = first_duplicate(request.table_ids.iter().copied()) {
            return invalid(format!("table {dup} is listed more than once"));
        }
        if let Some(dup) = first_duplicate(request.menu_sets.iter().map(|s| s.menu_set_id)) {
            return invalid(format!("menu set {dup} is listed more than once"));
        }
        if let Some(dup) = first_duplicate(request.menu_items.iter().map(|i| i.menu_item_id)) {
            return invalid(format!("menu item {dup} is listed more than once"));
        }
        if request.menu_sets.iter().any(|s| s.quantity < 1)
            || request.menu_items.iter().any(|i| i.quantity < 1)
        {
            return invalid("ordered quantities must be at least 1".to_string());
        }

        Ok(Self {
            customer_name: request.customer_name.trim().to_string(),
            company_name: request.company_name.filter(|c| !c.trim().is_empty()),
            booking_date_time,
            phone_number: request.phone_number,
            num_children: request.num_children,
            num_adults: request.num_adults,
            num_tables: request.num_tables,
            total_price: request.total_price,
            table_ids: request.table_ids,
            menu_sets: request.menu_sets,
            menu_items: request.menu_items,
        })
    }

    fn active_model(&self, id: Uuid, status: BookingStatus) -> booking::ActiveModel {
        let now = to_canonical(Utc::now());
        booking::ActiveModel {
            id: Set(id),
            customer_name: Set(self.customer_name.clone()),
            company_name: Set(self.company_name.clone()),
            booking_date_time: Set(self.booking_date_time),
            phone_number: Set(self.phone_number.clone()),
            num_children: Set(self.num_children),
            num_adults: Set(self.num_adults),
            num_tables: Set(self.num_tables),
            total_price: Set(self.total_price),
            status: Set(status),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

fn first_duplicate<I: IntoIterator<Item = Uuid>>(ids: I) -> Option<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

pub struct SaveBookingService;

impl SaveBookingService {
    /// Creates a booking and its child rows in one transaction.
    ///
    /// The booking is always created as `CONFIRMED`; the request's own id is
    /// used when given, otherwise a new one is generated.
    pub async fn create_booking(
        db: &DatabaseConnection,
        request: BookingRequest,
    ) -> ServiceResult<Uuid> {
        let booking_id = request.booking_id.unwrap_or_else(Uuid::new_v4);
        let booking = ValidatedBooking::from_request(request)?;

        let txn = db.begin().await?;

        Self::ensure_tables_free(&txn, &booking, None).await?;

        booking::Entity::insert(booking.active_model(booking_id, BookingStatus::Confirmed))
            .exec_without_returning(&txn)
            .await?;
        Self::insert_children(&txn, booking_id, &booking).await?;

        txn.commit().await?;

        info!(
            "Created booking {booking_id} at {} for {} table(s)",
            booking.booking_date_time.to_rfc3339(),
            booking.table_ids.len()
        );
        Ok(booking_id)
    }

    /// Replaces a booking's fields and all of its child rows.
    ///
    /// `request.status` of `None` keeps the current status.
    pub async fn update_booking(
        db: &DatabaseConnection,
        id: &str,
        request: BookingRequest,
    ) -> ServiceResult<()> {
        let booking_id = parse_id(id)?;
        let new_status = request.status;
        let booking = ValidatedBooking::from_request(request)?;

        let txn = db.begin().await?;

        let existing = booking::Entity::find_by_id(booking_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("booking {booking_id}")))?;

        let status = new_status.unwrap_or(existing.status);
        if status.is_active() {
            Self::ensure_tables_free(&txn, &booking, Some(booking_id)).await?;
        }

        let mut model = booking.active_model(booking_id, status);
        model.id = NotSet;
        model.created_at = NotSet;
        booking::Entity::update_many()
            .set(model)
            .filter(booking::Column::Id.eq(booking_id))
            .exec(&txn)
            .await?;

        Self::delete_children(&txn, booking_id).await?;
        Self::insert_children(&txn, booking_id, &booking).await?;

        txn.commit().await?;

        info!("Updated booking {booking_id} ({})", status.as_ref());
        Ok(())
    }

    /// Deletes a booking together with all of its child rows
    pub async fn delete_booking(db: &DatabaseConnection, id: &str) -> ServiceResult<()> {
        let booking_id = parse_id(id)?;

        let txn = db.begin().await?;

        Self::delete_children(&txn, booking_id).await?;
        let deleted = booking::Entity::delete_many()
            .filter(booking::Column::Id.eq(booking_id))
            .exec(&txn)
            .await?;

        if deleted.rows_affected == 0 {
            warn!("Delete requested for unknown booking {booking_id}");
            return Err(ServiceError::NotFound(format!("booking {booking_id}")));
        }

        txn.commit().await?;

        info!("Deleted booking {booking_id}");
        Ok(())
    }

    /// Fails with `AlreadyExists` if an active booking other than `exclude`
    /// holds any requested table during the slot of the booking time.
    ///
    /// The requested table rows are locked first, so concurrent writers
    /// touching the same tables are serialized until this transaction ends.
    async fn ensure_tables_free(
        txn: &DatabaseTransaction,
        booking: &ValidatedBooking,
        exclude: Option<Uuid>,
    ) -> ServiceResult<()> {
        if booking.table_ids.is_empty() {
            return Ok(());
        }

        let tables = dining_table::Entity::find()
            .filter(dining_table::Column::Id.is_in(booking.table_ids.iter().copied()))
            .lock_exclusive()
            .all(txn)
            .await?;

        if tables.len() != booking.table_ids.len() {
            let found: HashSet<Uuid> = tables.iter().map(|t| t.id).collect();
            let missing: Vec<String> = booking
                .table_ids
                .iter()
                .filter(|id| !found.contains(id))
                .map(Uuid::to_string)
                .collect();
            return Err(ServiceError::NotFound(format!(
                "table(s) {}",
                missing.join(", ")
            )));
        }

        let slot = TimeSlot::containing(booking.booking_date_time);
        let held: Vec<BookedTable> = booking_table::Entity::find()
            .select_only()
            .column(booking_table::Column::TableId)
            .column_as(booking::Column::BookingDateTime, "booking_date_time")
            .inner_join(booking::Entity)
            .filter(booking_table::Column::TableId.is_in(booking.table_ids.iter().copied()))
            .filter(booking::Column::BookingDateTime.gte(slot.start()))
            .filter(booking::Column::BookingDateTime.lt(slot.end()))
            .filter(booking::Column::Status.is_not_in(BookingStatus::INACTIVE))
            .apply_if(exclude, |query, id| query.filter(booking::Column::Id.ne(id)))
            .into_model::<BookedTable>()
            .all(txn)
            .await?;

        if held.is_empty() {
            return Ok(());
        }

        let mut numbers: Vec<i32> = tables
            .iter()
            .filter(|t| held.iter().any(|h| h.table_id == t.id))
            .map(|t| t.num_table)
            .collect();
        numbers.sort_unstable();
        numbers.dedup();

        error!(
            "Rejected booking at {}: table(s) {numbers:?} already booked",
            booking.booking_date_time.to_rfc3339()
        );
        Err(ServiceError::AlreadyExists(format!(
            "table(s) {numbers:?} already booked for the {} slot",
            slot.label()
        )))
    }

    async fn insert_children(
        txn: &DatabaseTransaction,
        booking_id: Uuid,
        booking: &ValidatedBooking,
    ) -> ServiceResult<()> {
        if !booking.table_ids.is_empty() {
            let rows = booking
                .table_ids
                .iter()
                .zip(0..)
                .map(|(table_id, position)| booking_table::ActiveModel {
                    booking_id: Set(booking_id),
                    table_id: Set(*table_id),
                    position: Set(position),
                });
            booking_table::Entity::insert_many(rows)
                .exec_without_returning(txn)
                .await?;
        }

        if !booking.menu_sets.is_empty() {
            let rows = booking
                .menu_sets
                .iter()
                .zip(0..)
                .map(|(set, position)| booking_menu_set::ActiveModel {
                    booking_id: Set(booking_id),
                    menu_set_id: Set(set.menu_set_id),
                    quantity: Set(set.quantity),
                    position: Set(position),
                });
            booking_menu_set::Entity::insert_many(rows)
                .exec_without_returning(txn)
                .await?;
        }

        if !booking.menu_items.is_empty() {
            let rows = booking
                .menu_items
                .iter()
                .zip(0..)
                .map(|(item, position)| booking_menu_item::ActiveModel {
                    booking_id: Set(booking_id),
                    menu_item_id: Set(item.menu_item_id),
                    quantity: Set(item.quantity),
                    position: Set(position),
                });
            booking_menu_item::Entity::insert_many(rows)
                .exec_without_returning(txn)
                .await?;
        }

        Ok(())
    }

    async fn delete_children(txn: &DatabaseTransaction, booking_id: Uuid) -> ServiceResult<()> {
        booking_table::Entity::delete_many()
            .filter(booking_table::Column::BookingId.eq(booking_id))
            .exec(txn)
            .await?;
        booking_menu_set::Entity::delete_many()
            .filter(booking_menu_set::Column::BookingId.eq(booking_id))
            .exec(txn)
            .await?;
        booking_menu_item::Entity::delete_many()
            .filter(booking_menu_item::Column::BookingId.eq(booking_id))
            .exec(txn)
            .await?;
        Ok(())
    }
}
