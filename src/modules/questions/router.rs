use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use super::controller::{
    create_question, delete_question, get_question, get_questions, get_questions_by_date,
    update_question_status,
};
use crate::middleware::role::{ADMIN, ADMIN_PARTICIPANT, ADMIN_TRAINER, ANY_ROLE, RequireRoles};
use crate::state::AppState;

pub fn init_questions_router(state: &AppState) -> Router<AppState> {
    let tokens = &state.tokens;

    Router::new()
        .route("/", get(get_questions_by_date).require(tokens, ANY_ROLE))
        .route("/", post(create_question).require(tokens, ADMIN_PARTICIPANT))
        .route("/all", get(get_questions).require(tokens, ADMIN_TRAINER))
        .route("/{id}", get(get_question).require(tokens, ANY_ROLE))
        .route("/{id}", delete(delete_question).require(tokens, ADMIN))
        .route(
            "/{id}/status",
            patch(update_question_status).require(tokens, ADMIN_TRAINER),
        )
}
