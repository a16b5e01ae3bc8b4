use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, error, field, info, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuses the caller's `x-request-id` when it is short and printable, otherwise mints one.
fn request_id(req: &Request) -> String {
    req.headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn log_completion(status: StatusCode, latency: Duration) {
    let status = status.as_u16();
    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);

    if status >= 500 {
        error!(status, latency_ms, "Server error");
    } else if status >= 400 {
        warn!(status, latency_ms, "Client error");
    } else {
        info!(status, latency_ms, "Request completed");
    }
}

/// Wraps each request in a `request` span and echoes its id in `x-request-id`.
///
/// The span carries `user_id` and `role` once [`require_roles`] has verified the caller,
/// so every event of an authenticated request names its subject.
///
/// [`require_roles`]: crate::middleware::role::require_roles
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = request_id(&req);
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %path,
        user_id = field::Empty,
        role = field::Empty,
    );
    span.in_scope(|| info!("Incoming request"));

    let mut response = next.run(req).instrument(span.clone()).await;
    span.in_scope(|| log_completion(response.status(), start.elapsed()));

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Console output plus two daily-rolling files under `LOG_DIR` (default `storage/logs`):
/// `instructor-led.log` for errors and `instructor-led.json` for structured info logs.
///
/// The returned guards flush the file writers and must be held until shutdown.
pub fn init_tracing() -> std::io::Result<Vec<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "storage/logs".to_string());
    std::fs::create_dir_all(&log_dir)?;

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,instructor_db=info,tower_http=warn",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "instructor-led.log");
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "instructor-led.json");
    let (json_writer, json_guard) = tracing_appender::non_blocking(json_appender);

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_writer)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .init();

    Ok(vec![file_guard, json_guard])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn(logging_middleware))
    }

    async fn response_id(header: Option<&str>) -> String {
        let mut request = axum::http::Request::builder().uri("/ping");
        if let Some(id) = header {
            request = request.header(REQUEST_ID_HEADER, id);
        }
        let response = app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        assert_eq!(response_id(Some("trace-42")).await, "trace-42");
    }

    #[tokio::test]
    async fn test_request_id_is_minted_when_absent_or_oversized() {
        assert!(Uuid::parse_str(&response_id(None).await).is_ok());

        let oversized = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        assert!(Uuid::parse_str(&response_id(Some(&oversized)).await).is_ok());
    }
}
