use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;
use uuid::Uuid;

use instructor_core::{AppError, Deleted, ErrorResponse, PagedResponse, SingleResponse};
use instructor_models::schedules::{
    CreateScheduleDto, Schedule, ScheduleFilterParams, UpdateDocumentationDto,
};

use super::service::ScheduleService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    post,
    path = "/api/v1/schedules",
    request_body = CreateScheduleDto,
    responses(
        (status = 201, description = "Schedule created", body = SingleResponse<Schedule>),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN or PARTICIPANT", body = ErrorResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse),
        (status = 422, description = "Invalid time range or documentation URL", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state))]
pub async fn create_schedule(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateScheduleDto>,
) -> Result<(StatusCode, Json<SingleResponse<Schedule>>), AppError> {
    let schedule = ScheduleService::create_schedule(&state.store, &auth_user, dto).await?;
    Ok((StatusCode::CREATED, Json(SingleResponse::created(schedule))))
}

#[utoipa::path(
    get,
    path = "/api/v1/schedules",
    params(ScheduleFilterParams),
    responses(
        (status = 200, description = "Page of schedules", body = PagedResponse<Schedule>),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN or TRAINER", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state))]
pub async fn get_schedules(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ScheduleFilterParams>,
) -> Result<Json<PagedResponse<Schedule>>, AppError> {
    let page = ScheduleService::get_schedules(&state.store, params).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Schedule details", body = SingleResponse<Schedule>),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state))]
pub async fn get_schedule(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<SingleResponse<Schedule>>, AppError> {
    let schedule = ScheduleService::get_schedule(&state.store, id).await?;
    Ok(Json(SingleResponse::ok(schedule)))
}

/// Record the documentation link of a held session
#[utoipa::path(
    patch,
    path = "/api/v1/schedules/{id}/documentation",
    params(
        ("id" = Uuid, Path, description = "Schedule ID")
    ),
    request_body = UpdateDocumentationDto,
    responses(
        (status = 200, description = "Documentation recorded", body = SingleResponse<Schedule>),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN or PARTICIPANT", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse),
        (status = 422, description = "Invalid URL", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state))]
pub async fn update_documentation(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateDocumentationDto>,
) -> Result<Json<SingleResponse<Schedule>>, AppError> {
    let schedule = ScheduleService::update_documentation(&state.store, id, dto).await?;
    Ok(Json(SingleResponse::ok(schedule)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Schedule deleted", body = SingleResponse<Deleted>),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state))]
pub async fn delete_schedule(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<SingleResponse<Deleted>>, AppError> {
    ScheduleService::delete_schedule(&state.store, id).await?;
    Ok(Json(SingleResponse::ok(Deleted { id })))
}
