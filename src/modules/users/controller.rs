use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;
use uuid::Uuid;

use instructor_core::{AppError, Deleted, ErrorResponse, PagedResponse, SingleResponse};
use instructor_models::users::{CreateUserDto, UpdateUserDto, User, UserFilterParams};

use super::service::UserService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created successfully", body = SingleResponse<User>),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<SingleResponse<User>>), AppError> {
    let user = UserService::create_user(&state.store, dto).await?;
    Ok((StatusCode::CREATED, Json(SingleResponse::created(user))))
}

/// List users, newest first
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(UserFilterParams),
    responses(
        (status = 200, description = "Page of users", body = PagedResponse<User>),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN or TRAINER", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<UserFilterParams>,
) -> Result<Json<PagedResponse<User>>, AppError> {
    let page = UserService::get_users(&state.store, params).await?;
    Ok(Json(page.into()))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = SingleResponse<User>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<SingleResponse<User>>, AppError> {
    let user = UserService::get_user(&state.store, auth_user.user_id()?).await?;
    Ok(Json(SingleResponse::ok(user)))
}

/// Get a user by email
#[utoipa::path(
    get,
    path = "/api/v1/users/email/{email}",
    params(
        ("email" = String, Path, description = "Exact email address")
    ),
    responses(
        (status = 200, description = "User details", body = SingleResponse<User>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    ValidatedPath(email): ValidatedPath<String>,
) -> Result<Json<SingleResponse<User>>, AppError> {
    let user = UserService::get_user_by_email(&state.store, &email).await?;
    Ok(Json(SingleResponse::ok(user)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = SingleResponse<User>),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN or TRAINER", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<SingleResponse<User>>, AppError> {
    let user = UserService::get_user(&state.store, id).await?;
    Ok(Json(SingleResponse::ok(user)))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = SingleResponse<User>),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn update_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<SingleResponse<User>>, AppError> {
    let user = UserService::update_user(&state.store, id, dto).await?;
    Ok(Json(SingleResponse::ok(user)))
}

/// Soft-delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = SingleResponse<Deleted>),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<SingleResponse<Deleted>>, AppError> {
    UserService::delete_user(&state.store, id).await?;
    Ok(Json(SingleResponse::ok(Deleted { id })))
}
