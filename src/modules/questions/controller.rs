use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;
use uuid::Uuid;

use instructor_core::{AppError, Deleted, ErrorResponse, PagedResponse, SingleResponse};
use instructor_models::questions::{
    CreateQuestionDto, Question, QuestionFilterParams, QuestionsByDateParams,
    UpdateQuestionStatusDto,
};
use instructor_models::schedules::ScheduleWithQuestions;

use super::service::QuestionService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

/// Raise a question against a schedule
#[utoipa::path(
    post,
    path = "/api/v1/questions",
    request_body = CreateQuestionDto,
    responses(
        (status = 201, description = "Question created", body = SingleResponse<Question>),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN or PARTICIPANT", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn create_question(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateQuestionDto>,
) -> Result<(StatusCode, Json<SingleResponse<Question>>), AppError> {
    let question = QuestionService::create_question(&state.store, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(SingleResponse::created(question))))
}

/// Schedules on a date with their questions
#[utoipa::path(
    get,
    path = "/api/v1/questions",
    params(QuestionsByDateParams),
    responses(
        (status = 200, description = "Schedules with questions", body = SingleResponse<Vec<ScheduleWithQuestions>>),
        (status = 400, description = "Missing or malformed date", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn get_questions_by_date(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<QuestionsByDateParams>,
) -> Result<Json<SingleResponse<Vec<ScheduleWithQuestions>>>, AppError> {
    let schedules = QuestionService::get_questions_by_date(&state.store, params).await?;
    Ok(Json(SingleResponse::ok(schedules)))
}

/// List questions, newest first
#[utoipa::path(
    get,
    path = "/api/v1/questions/all",
    params(QuestionFilterParams),
    responses(
        (status = 200, description = "Page of questions", body = PagedResponse<Question>),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN or TRAINER", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn get_questions(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<QuestionFilterParams>,
) -> Result<Json<PagedResponse<Question>>, AppError> {
    let page = QuestionService::get_questions(&state.store, params).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/questions/{id}",
    params(
        ("id" = Uuid, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "Question details", body = SingleResponse<Question>),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Question not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn get_question(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<SingleResponse<Question>>, AppError> {
    let question = QuestionService::get_question(&state.store, id).await?;
    Ok(Json(SingleResponse::ok(question)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/questions/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Question ID")
    ),
    request_body = UpdateQuestionStatusDto,
    responses(
        (status = 200, description = "Status updated", body = SingleResponse<Question>),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN or TRAINER", body = ErrorResponse),
        (status = 404, description = "Question not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn update_question_status(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateQuestionStatusDto>,
) -> Result<Json<SingleResponse<Question>>, AppError> {
    let question = QuestionService::update_status(&state.store, id, dto).await?;
    Ok(Json(SingleResponse::ok(question)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/questions/{id}",
    params(
        ("id" = Uuid, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "Question deleted", body = SingleResponse<Deleted>),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires ADMIN", body = ErrorResponse),
        (status = 404, description = "Question not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn delete_question(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<SingleResponse<Deleted>>, AppError> {
    QuestionService::delete_question(&state.store, id).await?;
    Ok(Json(SingleResponse::ok(Deleted { id })))
}
