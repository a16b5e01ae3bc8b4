//! # Instructor Config
//!
//! Configuration types for the instructor-led API, each loaded from environment variables
//! through a `from_env()` constructor:
//!
//! - [`jwt`]: token issuer, signing secret and lifetime
//! - [`database`]: PostgreSQL connection parameters
//! - [`server`]: HTTP bind address
//! - [`cors`]: allowed browser origins
//!
//! Values are passed into the services that need them by constructor; nothing here is a
//! process-wide singleton.

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

use thiserror::Error;

/// Startup configuration problems.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
    #[error("environment variable {name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

pub(crate) fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn env_parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
