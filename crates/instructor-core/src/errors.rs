//! Application error type.
//!
//! Every handler and service returns `Result<T, AppError>`. An [`AppError`] pairs an HTTP
//! status with the underlying [`anyhow::Error`] and renders as the error envelope:
//!
//! ```json
//! { "status": { "code": 404, "message": "Schedule not found" } }
//! ```
//!
//! Server errors (5xx) never leak their cause: the cause is logged through `tracing` and
//! the client only sees a generic message.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::ErrorResponse;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }

    /// Login failure. The same message is used for unknown emails and wrong passwords.
    pub fn invalid_credentials() -> Self {
        Self::unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// The message a client is allowed to see.
    pub fn public_message(&self) -> String {
        if self.status.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = Json(ErrorResponse::new(self.status, self.public_message()));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
