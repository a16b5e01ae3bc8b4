//! Request extractors that reject with the error envelope instead of axum's plain-text
//! rejections.
//!
//! - [`ValidatedJson`]: JSON body, then `validator` rules (422 on a rule violation)
//! - [`ValidatedQuery`]: query string (400 when a value does not parse)
//! - [`ValidatedPath`]: path parameters (400 on a malformed id)

use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use instructor_core::AppError;

fn format_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().filter_map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .or_else(|| Some(format!("{} is invalid", field)))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value.validate().map_err(|errors| {
        AppError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            anyhow!("{}", format_errors(&errors)),
        )
    })
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::bad_request(anyhow!("{} is required", field));
    }

    if error_msg.contains("invalid type") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

/// Keeps serde's reason (e.g. "page: invalid digit found in string") and drops axum's
/// prefix.
fn query_rejection(rejection: QueryRejection) -> AppError {
    let text = rejection.body_text();
    let reason = text
        .strip_prefix("Failed to deserialize query string: ")
        .unwrap_or(&text);
    AppError::bad_request(anyhow!("Invalid query parameter: {}", reason))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        validate(&value)?;

        Ok(ValidatedJson(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;

        validate(&value)?;

        Ok(ValidatedQuery(value))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(reason = %rejection.body_text(), "Path rejected");
                AppError::bad_request(anyhow!("Invalid path parameter"))
            })?;

        Ok(ValidatedPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Params {
        page: Option<i64>,
    }

    async fn extract_query(uri: &str) -> Result<ValidatedQuery<Params>, AppError> {
        let (mut parts, _) = HttpRequest::builder()
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        ValidatedQuery::<Params>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_query_parses() {
        let ValidatedQuery(params) = extract_query("/items?page=2").await.unwrap();
        assert_eq!(params.page, Some(2));

        let ValidatedQuery(params) = extract_query("/items").await.unwrap();
        assert_eq!(params.page, None);
    }

    #[tokio::test]
    async fn test_unparseable_query_is_400() {
        let err = extract_query("/items?page=two").await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.public_message().starts_with("Invalid query parameter"));
    }
}
