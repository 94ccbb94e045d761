use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    booking::{Booking, BookingMenuItem, BookingMenuSet, BookingStatus, BookingTable},
    menu::MenuCategory,
    table::TableType,
    time_slot::to_canonical,
};

/// One row of the wide booking join.
///
/// The join fans out over booking tables × menu sets × set items × standalone
/// items, so booking columns repeat on every row and each child column group
/// is `None` when that side of a LEFT JOIN had no match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
pub struct BookingRow {
    pub booking_id: Uuid,
    pub customer_name: String,
    pub company_name: Option<String>,
    pub booking_date_time: DateTime<FixedOffset>,
    pub phone_number: String,
    pub num_children: i32,
    pub num_adults: i32,
    pub num_tables: i32,
    pub total_price: f64,
    pub status: BookingStatus,

    pub table_id: Option<Uuid>,
    pub num_table: Option<i32>,
    pub table_type: Option<TableType>,
    pub seat_count: Option<i32>,

    pub menu_set_id: Option<Uuid>,
    pub menu_set_name: Option<String>,
    pub menu_set_price: Option<f64>,
    pub menu_set_quantity: Option<i32>,

    pub menu_item_id: Option<Uuid>,
    pub menu_item_name_th: Option<String>,
    pub menu_item_name_en: Option<String>,
    pub menu_item_description: Option<String>,
    pub menu_item_price: Option<f64>,
    pub menu_item_category: Option<MenuCategory>,
    pub menu_item_image_url: Option<String>,

    pub separate_menu_item_id: Option<Uuid>,
    pub separate_menu_item_name_th: Option<String>,
    pub separate_menu_item_name_en: Option<String>,
    pub separate_menu_item_description: Option<String>,
    pub separate_menu_item_price: Option<f64>,
    pub separate_menu_item_category: Option<MenuCategory>,
    pub separate_menu_item_image_url: Option<String>,
    pub separate_menu_item_quantity: Option<i32>,
}

impl BookingRow {
    fn empty_booking(&self) -> Booking {
        Booking {
            booking_id: self.booking_id,
            customer_name: self.customer_name.clone(),
            company_name: self.company_name.clone(),
            booking_date_time: to_canonical(self.booking_date_time),
            phone_number: self.phone_number.clone(),
            num_children: self.num_children,
            num_adults: self.num_adults,
            num_tables: self.num_tables,
            total_price: self.total_price,
            status: self.status,
            tables: Vec::new(),
            menu_sets: Vec::new(),
            menu_items: Vec::new(),
        }
    }

    fn table(&self) -> Option<BookingTable> {
        Some(BookingTable {
            table_id: self.table_id?,
            num_table: self.num_table,
            table_type: self.table_type,
            seat_count: self.seat_count,
        })
    }

    fn separate_menu_item(&self) -> Option<BookingMenuItem> {
        Some(BookingMenuItem {
            menu_item_id: self.separate_menu_item_id?,
            name_th: self.separate_menu_item_name_th.clone(),
            name_en: self.separate_menu_item_name_en.clone(),
            description: self.separate_menu_item_description.clone(),
            price: self.separate_menu_item_price,
            category: self.separate_menu_item_category,
            image_url: self.separate_menu_item_image_url.clone(),
            quantity: self.separate_menu_item_quantity.unwrap_or_default(),
        })
    }

    fn menu_set(&self) -> Option<BookingMenuSet> {
        Some(BookingMenuSet {
            menu_set_id: self.menu_set_id?,
            menu_set_name: self.menu_set_name.clone(),
            menu_set_price: self.menu_set_price,
            quantity: self.menu_set_quantity.unwrap_or_default(),
            menu_items: Vec::new(),
        })
    }

    fn set_menu_item(&self) -> Option<BookingMenuItem> {
        Some(BookingMenuItem {
            menu_item_id: self.menu_item_id?,
            name_th: self.menu_item_name_th.clone(),
            name_en: self.menu_item_name_en.clone(),
            description: self.menu_item_description.clone(),
            price: self.menu_item_price,
            category: self.menu_item_category,
            image_url: self.menu_item_image_url.clone(),
            quantity: 0,
        })
    }
}

/// Folds the rows of the wide booking join back into nested bookings.
///
/// Bookings come out in the order their id is first seen, and every child
/// list keeps first-seen order. Repeated tables, standalone items, menu sets
/// and (menu set, item) pairs produced by the join fan-out are dropped.
pub fn map_booking_details<I>(rows: I) -> Vec<Booking>
where
    I: IntoIterator<Item = BookingRow>,
{
    let mut bookings: Vec<Booking> = Vec::new();
    let mut index_by_id: HashMap<Uuid, usize> = HashMap::new();

    for row in rows {
        let idx = *index_by_id.entry(row.booking_id).or_insert_with(|| {
            bookings.push(row.empty_booking());
            bookings.len() - 1
        });
        let booking = &mut bookings[idx];

        if let Some(table) = row.table()
            && !booking.tables.iter().any(|t| t.table_id == table.table_id)
        {
            booking.tables.push(table);
        }

        if let Some(item) = row.separate_menu_item()
            && !booking
                .menu_items
                .iter()
                .any(|i| i.menu_item_id == item.menu_item_id)
        {
            booking.menu_items.push(item);
        }

        if let Some(set) = row.menu_set() {
            let set_idx = match booking
                .menu_sets
                .iter()
                .position(|s| s.menu_set_id == set.menu_set_id)
            {
                Some(existing) => existing,
                None => {
                    booking.menu_sets.push(set);
                    booking.menu_sets.len() - 1
                }
            };
            let menu_set = &mut booking.menu_sets[set_idx];

            if let Some(item) = row.set_menu_item()
                && !menu_set
                    .menu_items
                    .iter()
                    .any(|i| i.menu_item_id == item.menu_item_id)
            {
                menu_set.menu_items.push(item);
            }
        }
    }

    bookings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_slot::parse_booking_date_time;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn base_row(booking_id: Uuid) -> BookingRow {
        BookingRow {
            booking_id,
            customer_name: "Somchai".to_string(),
            company_name: None,
            booking_date_time: parse_booking_date_time("2025-06-01T11:00:00Z").unwrap(),
            phone_number: "0812345678".to_string(),
            num_children: 1,
            num_adults: 2,
            num_tables: 2,
            total_price: 1250.0,
            status: BookingStatus::Confirmed,
            table_id: None,
            num_table: None,
            table_type: None,
            seat_count: None,
            menu_set_id: None,
            menu_set_name: None,
            menu_set_price: None,
            menu_set_quantity: None,
            menu_item_id: None,
            menu_item_name_th: None,
            menu_item_name_en: None,
            menu_item_description: None,
            menu_item_price: None,
            menu_item_category: None,
            menu_item_image_url: None,
            separate_menu_item_id: None,
            separate_menu_item_name_th: None,
            separate_menu_item_name_en: None,
            separate_menu_item_description: None,
            separate_menu_item_price: None,
            separate_menu_item_category: None,
            separate_menu_item_image_url: None,
            separate_menu_item_quantity: None,
        }
    }

    fn with_table(mut row: BookingRow, table: u128, number: i32) -> BookingRow {
        row.table_id = Some(id(table));
        row.num_table = Some(number);
        row.table_type = Some(TableType::Standard);
        row.seat_count = Some(4);
        row
    }

    fn with_set_item(mut row: BookingRow, set: u128, item: u128) -> BookingRow {
        row.menu_set_id = Some(id(set));
        row.menu_set_name = Some("Family Set".to_string());
        row.menu_set_price = Some(899.0);
        row.menu_set_quantity = Some(1);
        row.menu_item_id = Some(id(item));
        row.menu_item_name_en = Some(format!("Set item {item}"));
        row.menu_item_category = Some(MenuCategory::MainCourse);
        row
    }

    fn with_separate_item(mut row: BookingRow, item: u128, quantity: i32) -> BookingRow {
        row.separate_menu_item_id = Some(id(item));
        row.separate_menu_item_name_en = Some("Thai Iced Tea".to_string());
        row.separate_menu_item_category = Some(MenuCategory::Beverage);
        row.separate_menu_item_price = Some(60.0);
        row.separate_menu_item_quantity = Some(quantity);
        row
    }

    /// Full cross product for one booking: 2 tables × (1 set × 2 items) × 1 item
    fn fan_out_rows(booking: Uuid) -> Vec<BookingRow> {
        let mut rows = Vec::new();
        for (table, number) in [(11, 1), (12, 2)] {
            for item in [31, 32] {
                let row = with_table(base_row(booking), table, number);
                let row = with_set_item(row, 21, item);
                rows.push(with_separate_item(row, 41, 3));
            }
        }
        rows
    }

    #[test]
    fn test_map_booking_details_deduplicates_fan_out() {
        let bookings = map_booking_details(fan_out_rows(id(1)));

        assert_eq!(bookings.len(), 1);
        let booking = &bookings[0];

        let tables: Vec<_> = booking.tables.iter().map(|t| t.table_id).collect();
        assert_eq!(tables, vec![id(11), id(12)]);

        assert_eq!(booking.menu_sets.len(), 1);
        let set_items: Vec<_> = booking.menu_sets[0]
            .menu_items
            .iter()
            .map(|i| i.menu_item_id)
            .collect();
        assert_eq!(set_items, vec![id(31), id(32)]);
        assert_eq!(booking.menu_sets[0].quantity, 1);

        assert_eq!(booking.menu_items.len(), 1);
        assert_eq!(booking.menu_items[0].menu_item_id, id(41));
        assert_eq!(booking.menu_items[0].quantity, 3);
    }

    #[test]
    fn test_map_booking_details_keeps_first_seen_order() {
        let mut rows = Vec::new();
        for booking in [id(3), id(1), id(2)] {
            rows.push(with_table(base_row(booking), 11, 1));
        }
        // A late row for an earlier booking must not move it
        rows.push(with_table(base_row(id(3)), 12, 2));

        let order: Vec<_> = map_booking_details(rows)
            .into_iter()
            .map(|b| b.booking_id)
            .collect();
        assert_eq!(order, vec![id(3), id(1), id(2)]);
    }

    #[test]
    fn test_map_booking_details_booking_without_children() {
        let bookings = map_booking_details(vec![base_row(id(1))]);

        assert_eq!(bookings.len(), 1);
        assert!(bookings[0].tables.is_empty());
        assert!(bookings[0].menu_sets.is_empty());
        assert!(bookings[0].menu_items.is_empty());
    }

    #[test]
    fn test_map_booking_details_menu_set_without_items() {
        let mut row = base_row(id(1));
        row.menu_set_id = Some(id(21));
        row.menu_set_quantity = Some(2);

        let bookings = map_booking_details(vec![row]);

        assert_eq!(bookings[0].menu_sets.len(), 1);
        assert!(bookings[0].menu_sets[0].menu_items.is_empty());
        assert_eq!(bookings[0].menu_sets[0].quantity, 2);
    }

    #[test]
    fn test_map_booking_details_same_item_in_two_sets() {
        let rows = vec![
            with_set_item(base_row(id(1)), 21, 31),
            with_set_item(base_row(id(1)), 22, 31),
        ];

        let bookings = map_booking_details(rows);
        let sets = &bookings[0].menu_sets;

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].menu_items[0].menu_item_id, id(31));
        assert_eq!(sets[1].menu_items[0].menu_item_id, id(31));
    }

    #[test]
    fn test_map_booking_details_normalizes_zone() {
        let mut row = base_row(id(1));
        row.booking_date_time = DateTime::parse_from_rfc3339("2025-06-01T11:00:00+00:00").unwrap();

        let bookings = map_booking_details(vec![row]);

        assert_eq!(
            bookings[0].booking_date_time.to_rfc3339(),
            "2025-06-01T18:00:00+07:00"
        );
    }

    #[test]
    fn test_map_booking_details_empty_input() {
        assert!(map_booking_details(Vec::new()).is_empty());
    }
}
