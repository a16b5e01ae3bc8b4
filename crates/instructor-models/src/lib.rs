//! # Instructor Models
//!
//! Domain rows, request DTOs and list filters for the instructor-led API.
//!
//! - [`users`]: accounts and their credentials
//! - [`schedules`]: training sessions owned by a user
//! - [`questions`]: questions raised against a schedule
//! - [`attendance`]: check-ins of a user at a schedule
//! - [`auth`]: login request and response
//!
//! Row types derive `sqlx::FromRow` and are returned to clients as-is, so anything secret
//! (the password digest) lives in a separate type that never derives `Serialize`.

pub mod attendance;
pub mod auth;
pub mod questions;
pub mod schedules;
pub mod users;

pub use instructor_auth::Role;
