use axum::Json;
use axum::extract::State;
use tracing::instrument;

use instructor_core::{AppError, ErrorResponse, SingleResponse};
use instructor_models::auth::{LoginRequest, LoginResponse};

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Login and receive a JWT token
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SingleResponse<LoginResponse>),
        (status = 400, description = "Bad request - malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<SingleResponse<LoginResponse>>, AppError> {
    let response = AuthService::login_user(&state.store, &state.tokens, dto).await?;
    Ok(Json(SingleResponse::ok(response)))
}
