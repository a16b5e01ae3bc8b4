use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::controller::{
    create_user, delete_user, get_profile, get_user, get_user_by_email, get_users, update_user,
};
use crate::middleware::role::{ADMIN, ADMIN_TRAINER, ANY_ROLE, RequireRoles};
use crate::state::AppState;

pub fn init_users_router(state: &AppState) -> Router<AppState> {
    let tokens = &state.tokens;

    Router::new()
        .route("/", post(create_user).require(tokens, ADMIN))
        .route("/", get(get_users).require(tokens, ADMIN_TRAINER))
        .route("/me", get(get_profile).require(tokens, ANY_ROLE))
        .route("/email/{email}", get(get_user_by_email).require(tokens, ADMIN))
        .route("/{id}", get(get_user).require(tokens, ADMIN_TRAINER))
        .route("/{id}", put(update_user).require(tokens, ADMIN))
        .route("/{id}", delete(delete_user).require(tokens, ADMIN))
}
