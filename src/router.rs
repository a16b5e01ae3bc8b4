use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use instructor_core::SingleResponse;

use crate::docs::ApiDoc;
use crate::logging::{REQUEST_ID_HEADER, logging_middleware};
use crate::modules::attendance::init_attendance_router;
use crate::modules::auth::init_auth_router;
use crate::modules::questions::init_questions_router;
use crate::modules::schedules::init_schedules_router;
use crate::modules::users::init_users_router;
use crate::state::AppState;

async fn health() -> Json<SingleResponse<&'static str>> {
    Json(SingleResponse::ok("healthy"))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            REQUEST_ID_HEADER,
        ])
        .expose_headers([REQUEST_ID_HEADER])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest(
            "/api/v1",
            Router::new()
                .merge(init_auth_router())
                .nest("/users", init_users_router(&state))
                .nest("/schedules", init_schedules_router(&state))
                .nest("/questions", init_questions_router(&state))
                .nest("/attendance", init_attendance_router(&state)),
        )
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
}
