//! Role-based authorization middleware for Axum
//!
//! Every protected route declares its allow-list when it is registered:
//!
//! ```rust,ignore
//! use axum::routing::{delete, get};
//! use crate::middleware::role::{ADMIN, ADMIN_TRAINER, RequireRoles};
//!
//! Router::new()
//!     .route("/all", get(get_questions).require(&state.tokens, ADMIN_TRAINER))
//!     .route("/{id}", delete(delete_question).require(&state.tokens, ADMIN))
//! ```
//!
//! [`require_roles`] then runs for each request to that route:
//! header -> token verification (401 on failure) -> role check (403 on failure) ->
//! the [`AuthUser`] is stored in the request extensions and the handler runs.

use std::fmt;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use instructor_auth::{Role, TokenError, TokenService};
use instructor_core::AppError;

use crate::middleware::auth::{AuthUser, bearer_token};

pub const ADMIN: &[Role] = &[Role::Admin];
pub const ADMIN_TRAINER: &[Role] = &[Role::Admin, Role::Trainer];
pub const ADMIN_PARTICIPANT: &[Role] = &[Role::Admin, Role::Participant];
pub const ANY_ROLE: &[Role] = &Role::ALL;

/// The allow-list of one route together with the verifier for its tokens.
#[derive(Clone)]
pub struct RoutePolicy {
    tokens: TokenService,
    allowed: &'static [Role],
}

impl RoutePolicy {
    pub fn new(tokens: TokenService, allowed: &'static [Role]) -> Self {
        Self { tokens, allowed }
    }

    pub fn allowed(&self) -> &'static [Role] {
        self.allowed
    }
}

impl fmt::Debug for RoutePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutePolicy")
            .field("allowed", &self.allowed)
            .finish_non_exhaustive()
    }
}

/// Authenticates the request and checks the caller's role against the route policy.
pub async fn require_roles(
    State(policy): State<RoutePolicy>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?;

    let claims = policy.tokens.verify(token).map_err(token_rejection)?;
    if claims.user_id().is_none() {
        return Err(AppError::unauthorized(
            "Invalid user ID in token".to_string(),
        ));
    }

    let span = tracing::Span::current();
    span.record("user_id", claims.sub.as_str());
    span.record("role", claims.role.as_str());

    check_any_role(claims.role, policy.allowed)?;

    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}

/// Checks membership of `role` in `allowed`.
pub fn check_any_role(role: Role, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&role) {
        return Ok(());
    }

    let required = allowed
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::forbidden(format!(
        "Access denied. Required roles: [{}], but user has role: {}",
        required, role
    )))
}

fn token_rejection(err: TokenError) -> AppError {
    tracing::debug!(error = %err, "Token rejected");
    match err {
        TokenError::Expired => AppError::unauthorized("Token has expired".to_string()),
        TokenError::MissingSecret | TokenError::Signing(_) => AppError::internal(err),
        _ => AppError::unauthorized("Invalid token".to_string()),
    }
}

/// Attaches a role allow-list to a method router.
pub trait RequireRoles {
    fn require(self, tokens: &TokenService, allowed: &'static [Role]) -> Self;
}

impl<S> RequireRoles for MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn require(self, tokens: &TokenService, allowed: &'static [Role]) -> Self {
        self.route_layer(middleware::from_fn_with_state(
            RoutePolicy::new(tokens.clone(), allowed),
            require_roles,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_check_any_role() {
        assert!(check_any_role(Role::Admin, ADMIN).is_ok());
        assert!(check_any_role(Role::Participant, ADMIN_PARTICIPANT).is_ok());
        assert!(check_any_role(Role::Trainer, ANY_ROLE).is_ok());

        let err = check_any_role(Role::Participant, ADMIN).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(
            err.public_message(),
            "Access denied. Required roles: [ADMIN], but user has role: PARTICIPANT"
        );
    }

    #[test]
    fn test_token_rejection_statuses() {
        assert_eq!(
            token_rejection(TokenError::Expired).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            token_rejection(TokenError::InvalidSignature).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            token_rejection(TokenError::MissingSecret).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
