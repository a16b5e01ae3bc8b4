//! PostgreSQL connection parameters.
//!
//! `DATABASE_URL` wins when present. Otherwise the URL is assembled from the discrete
//! variables:
//!
//! - `DB_HOST` (default `localhost`)
//! - `DB_PORT` (default `5432`)
//! - `DB_USER` (default `postgres`)
//! - `DB_PASSWORD` (default empty)
//! - `DB_NAME` (default `instructor_led`)
//! - `DB_MAX_CONNECTIONS` (default `10`)

use crate::{env_or, env_parse_or};

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &redact_password(&self.url))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                build_url(
                    &env_or("DB_HOST", "localhost"),
                    env_parse_or("DB_PORT", 5432),
                    &env_or("DB_USER", "postgres"),
                    &std::env::var("DB_PASSWORD").unwrap_or_default(),
                    &env_or("DB_NAME", "instructor_led"),
                )
            });

        Self {
            url,
            max_connections: env_parse_or("DB_MAX_CONNECTIONS", 10),
        }
    }
}

fn build_url(host: &str, port: u16, user: &str, password: &str, name: &str) -> String {
    if password.is_empty() {
        format!("postgres://{user}@{host}:{port}/{name}")
    } else {
        format!("postgres://{user}:{password}@{host}:{port}/{name}")
    }
}

fn redact_password(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.split_once(':') {
                Some((user, _)) => format!("{}{}:***{}", &url[..scheme_end + 3], user, &url[at..]),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}
