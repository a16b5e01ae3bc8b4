use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;
use uuid::Uuid;

use instructor_core::{AppError, Deleted, ErrorResponse, PagedResponse, SingleResponse};
use instructor_models::attendance::{Attendance, AttendanceFilterParams, CreateAttendanceDto};

use super::service::AttendanceService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

/// Check a user in to a schedule
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = CreateAttendanceDto,
    responses(
        (status = 201, description = "Attendance recorded", body = SingleResponse<Attendance>),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN or TRAINER", body = ErrorResponse),
        (status = 404, description = "User or schedule not found", body = ErrorResponse),
        (status = 409, description = "Attendance already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn create_attendance(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAttendanceDto>,
) -> Result<(StatusCode, Json<SingleResponse<Attendance>>), AppError> {
    let attendance = AttendanceService::create_attendance(&state.store, dto).await?;
    Ok((StatusCode::CREATED, Json(SingleResponse::created(attendance))))
}

#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(AttendanceFilterParams),
    responses(
        (status = 200, description = "Page of attendance records", body = PagedResponse<Attendance>),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN or TRAINER", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<AttendanceFilterParams>,
) -> Result<Json<PagedResponse<Attendance>>, AppError> {
    let page = AttendanceService::get_attendance(&state.store, params).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/attendance/{id}",
    params(
        ("id" = Uuid, Path, description = "Attendance ID")
    ),
    responses(
        (status = 200, description = "Attendance details", body = SingleResponse<Attendance>),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Attendance not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance_by_id(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<SingleResponse<Attendance>>, AppError> {
    let attendance = AttendanceService::get_attendance_by_id(&state.store, id).await?;
    Ok(Json(SingleResponse::ok(attendance)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/attendance/{id}",
    params(
        ("id" = Uuid, Path, description = "Attendance ID")
    ),
    responses(
        (status = 200, description = "Attendance deleted", body = SingleResponse<Deleted>),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN", body = ErrorResponse),
        (status = 404, description = "Attendance not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn delete_attendance(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<SingleResponse<Deleted>>, AppError> {
    AttendanceService::delete_attendance(&state.store, id).await?;
    Ok(Json(SingleResponse::ok(Deleted { id })))
}
