use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use uuid::Uuid;

use instructor_auth::{Claims, Role};
use instructor_core::AppError;

/// The verified caller. [`require_roles`](super::role::require_roles) puts it into the
/// request extensions; handlers behind that middleware extract it.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the user ID as UUID
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.0
            .user_id()
            .ok_or_else(|| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.0.role == role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.0.role)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication required".to_string()))
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized("Invalid authorization header format".to_string())
    })?;

    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::unauthorized("Missing bearer token".to_string()));
    }

    Ok(token)
}
