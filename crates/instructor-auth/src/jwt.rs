//! HS256 token issuance and verification.
//!
//! [`TokenService`] is built from a [`JwtConfig`] and cloned into the application state.
//! It verifies the HMAC-SHA256 signature and the issuer, and requires `exp` to be strictly
//! in the future (no leeway). Authorization is not its concern; callers
//! decide what a verified role may do.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use thiserror::Error;
use uuid::Uuid;

use instructor_config::JwtConfig;

use crate::claims::Claims;
use crate::role::Role;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing secret is not configured")]
    MissingSecret,
    #[error("token has expired")]
    Expired,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token issuer is not accepted")]
    InvalidIssuer,
    #[error("token is malformed")]
    Malformed,
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl TokenError {
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::Expired)
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
            _ => TokenError::Malformed,
        }
    }
}

struct Keys {
    issuer: String,
    ttl: Duration,
    has_secret: bool,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.keys.issuer)
            .field("ttl_hours", &self.keys.ttl.num_hours())
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "sub"]);

        Self {
            keys: Arc::new(Keys {
                issuer: config.issuer.clone(),
                ttl: Duration::hours(config.expiry_hours),
                has_secret: !config.secret.is_empty(),
                encoding: EncodingKey::from_secret(config.secret.as_bytes()),
                decoding: DecodingKey::from_secret(config.secret.as_bytes()),
                validation,
            }),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.keys.issuer
    }

    /// Issues a token valid for the configured lifetime.
    pub fn issue(&self, subject: Uuid, role: Role) -> Result<String, TokenError> {
        self.issue_with_ttl(subject, role, self.keys.ttl)
    }

    /// Issues a token valid for `ttl` from now. A negative `ttl` yields an already
    /// expired token.
    pub fn issue_with_ttl(
        &self,
        subject: Uuid,
        role: Role,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        if !self.keys.has_secret {
            return Err(TokenError::MissingSecret);
        }

        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            role,
            iss: self.keys.issuer.clone(),
            iat: now.timestamp().max(0) as usize,
            exp: (now + ttl).timestamp().max(0) as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(TokenError::Signing)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        if !self.keys.has_secret {
            return Err(TokenError::MissingSecret);
        }

        let data = decode::<Claims>(token, &self.keys.decoding, &self.keys.validation)?;

        // jsonwebtoken accepts `exp == now`; a token is only valid while `exp > now`.
        if data.claims.exp as i64 <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}
