use axum::{
    Router,
    routing::{delete, get, post},
};

use super::controller::{
    create_attendance, delete_attendance, get_attendance, get_attendance_by_id,
};
use crate::middleware::role::{ADMIN, ADMIN_TRAINER, ANY_ROLE, RequireRoles};
use crate::state::AppState;

pub fn init_attendance_router(state: &AppState) -> Router<AppState> {
    let tokens = &state.tokens;

    Router::new()
        .route("/", get(get_attendance).require(tokens, ADMIN_TRAINER))
        .route("/", post(create_attendance).require(tokens, ADMIN_TRAINER))
        .route("/{id}", get(get_attendance_by_id).require(tokens, ANY_ROLE))
        .route("/{id}", delete(delete_attendance).require(tokens, ADMIN))
}
