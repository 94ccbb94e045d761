pub mod dashboard;
pub mod menu;
pub mod query_booking;
pub mod save_booking;
pub mod table;
pub mod user;
