use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::{table::Table, time_slot::TimeSlot};

/// A table held by an active booking at the given time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
pub struct BookedTable {
    pub table_id: Uuid,
    pub booking_date_time: DateTime<FixedOffset>,
}

/// The tables still free during one slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotAvailability {
    /// Slot start as `HH:MM` in the canonical zone
    pub time_slot: String,
    pub start: DateTime<FixedOffset>,
    pub tables: Vec<Table>,
}

/// Lists, for every bookable slot of `date`, the tables no active booking
/// holds during that slot.
///
/// `booked` must only contain active bookings. Slots come out in
/// chronological order and tables in table-number order.
pub fn group_available_tables(
    date: NaiveDate,
    tables: &[Table],
    booked: &[BookedTable],
) -> Vec<SlotAvailability> {
    let held: HashSet<(TimeSlot, Uuid)> = booked
        .iter()
        .map(|b| (TimeSlot::containing(b.booking_date_time), b.table_id))
        .collect();

    let mut ordered_tables = tables.to_vec();
    ordered_tables.sort_by_key(|t| t.num_table);

    let mut slots = TimeSlot::for_date(date);
    slots.sort();

    slots
        .into_iter()
        .map(|slot| SlotAvailability {
            time_slot: slot.label(),
            start: slot.start(),
            tables: ordered_tables
                .iter()
                .filter(|t| !held.contains(&(slot, t.id)))
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        table::TableType,
        time_slot::{SLOTS_PER_DAY, parse_booking_date_time},
    };

    fn table(n: i32) -> Table {
        Table {
            id: Uuid::from_u128(n as u128),
            num_table: n,
            table_type: if n % 2 == 0 {
                TableType::Large
            } else {
                TableType::Standard
            },
            seat_count: if n % 2 == 0 { 8 } else { 4 },
        }
    }

    fn booked(n: i32, at: &str) -> BookedTable {
        BookedTable {
            table_id: Uuid::from_u128(n as u128),
            booking_date_time: parse_booking_date_time(at).unwrap(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_no_bookings_leaves_every_table_free() {
        let tables = vec![table(3), table(1), table(2)];
        let slots = group_available_tables(date(), &tables, &[]);

        assert_eq!(slots.len(), SLOTS_PER_DAY as usize);
        for slot in &slots {
            let numbers: Vec<_> = slot.tables.iter().map(|t| t.num_table).collect();
            assert_eq!(numbers, vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_booked_table_is_missing_only_from_its_slot() {
        let tables = vec![table(1), table(2)];
        // 18:00 UTC+7, written in UTC
        let bookings = vec![booked(1, "2025-06-01T11:20:00Z")];

        let slots = group_available_tables(date(), &tables, &bookings);

        for slot in &slots {
            let has_one = slot.tables.iter().any(|t| t.num_table == 1);
            assert_eq!(has_one, slot.time_slot != "18:00", "slot {}", slot.time_slot);
            assert_eq!(slot.tables.len() + usize::from(!has_one), tables.len());
        }
    }

    #[test]
    fn test_bookings_on_other_days_are_ignored() {
        let tables = vec![table(1)];
        let bookings = vec![booked(1, "2025-06-02T18:00:00+07:00")];

        let slots = group_available_tables(date(), &tables, &bookings);

        assert!(slots.iter().all(|s| s.tables.len() == 1));
    }

    #[test]
    fn test_slots_are_chronological() {
        let slots = group_available_tables(date(), &[table(1)], &[]);

        assert_eq!(slots[0].time_slot, "10:00");
        assert_eq!(slots[11].time_slot, "21:00");
        assert!(slots.windows(2).all(|pair| pair[0].start < pair[1].start));
    }
}
