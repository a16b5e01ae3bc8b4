use crate::{env_or, env_parse_or};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub run_migrations: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_or("API_HOST", "0.0.0.0"),
            port: env_parse_or("API_PORT", 8080),
            run_migrations: env_parse_or("RUN_MIGRATIONS", true),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
