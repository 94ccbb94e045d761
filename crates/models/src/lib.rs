pub mod availability;
pub mod booking;
pub mod booking_row;
pub mod dashboard;
pub mod menu;
pub mod table;
pub mod time_slot;
pub mod user;
