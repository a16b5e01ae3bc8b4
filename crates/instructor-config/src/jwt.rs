use std::env;

use crate::{ConfigError, env_or, env_parse_or};

/// Token issuance settings.
///
/// | Variable | Default |
/// |----------|---------|
/// | `ISSUER_NAME` | `instructor-led` |
/// | `SIGNATURE_KEY` | none, must be set |
/// | `TOKEN_EXPIRE` | `24` (hours) |
#[derive(Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub secret: String,
    pub expiry_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("secret", &"<redacted>")
            .field("expiry_hours", &self.expiry_hours)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(issuer: impl Into<String>, secret: impl Into<String>, expiry_hours: i64) -> Self {
        Self {
            issuer: issuer.into(),
            secret: secret.into(),
            expiry_hours,
        }
    }

    pub fn from_env() -> Self {
        Self {
            issuer: env_or("ISSUER_NAME", "instructor-led"),
            secret: env::var("SIGNATURE_KEY").unwrap_or_default(),
            expiry_hours: env_parse_or("TOKEN_EXPIRE", 24),
        }
    }

    /// Rejects a configuration the token service could not sign with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::Missing("SIGNATURE_KEY"));
        }
        if self.expiry_hours <= 0 {
            return Err(ConfigError::Invalid {
                name: "TOKEN_EXPIRE",
                value: self.expiry_hours.to_string(),
            });
        }
        Ok(())
    }
}
