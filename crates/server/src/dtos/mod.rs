pub mod auth;
pub mod common;
pub mod menu;
pub mod table;
pub mod user;
