pub mod attendance;
pub mod auth;
pub mod questions;
pub mod schedules;
pub mod users;
