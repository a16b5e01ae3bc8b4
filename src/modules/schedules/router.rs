use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use super::controller::{
    create_schedule, delete_schedule, get_schedule, get_schedules, update_documentation,
};
use crate::middleware::role::{ADMIN, ADMIN_PARTICIPANT, ADMIN_TRAINER, ANY_ROLE, RequireRoles};
use crate::state::AppState;

pub fn init_schedules_router(state: &AppState) -> Router<AppState> {
    let tokens = &state.tokens;

    Router::new()
        .route("/", get(get_schedules).require(tokens, ADMIN_TRAINER))
        .route("/", post(create_schedule).require(tokens, ADMIN_PARTICIPANT))
        .route("/{id}", get(get_schedule).require(tokens, ANY_ROLE))
        .route("/{id}", delete(delete_schedule).require(tokens, ADMIN))
        .route(
            "/{id}/documentation",
            patch(update_documentation).require(tokens, ADMIN_PARTICIPANT),
        )
}
