pub mod booking;
pub mod booking_menu_item;
pub mod booking_menu_set;
pub mod booking_table;
pub mod dining_table;
pub mod menu_item;
pub mod menu_set;
pub mod menu_set_item;
pub mod table_type;
pub mod user;
