//! Response envelopes.
//!
//! Single records are wrapped as `{status, data}`, pages as `{status, data, paging}` and
//! errors as `{status}` alone.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::pagination::{Page, Paging};

/// Outcome header carried by every response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Status {
    /// Mirrors the HTTP status code
    pub code: u16,
    pub message: String,
}

impl Status {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::OK, "Ok")
    }

    pub fn created() -> Self {
        Self::new(StatusCode::CREATED, "Created")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SingleResponse<T> {
    pub status: Status,
    pub data: T,
}

impl<T> SingleResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: Status::ok(),
            data,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: Status::created(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PagedResponse<T> {
    pub status: Status,
    pub data: Vec<T>,
    pub paging: Paging,
}

impl<T> From<Page<T>> for PagedResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            status: Status::ok(),
            data: page.items,
            paging: page.paging,
        }
    }
}

/// Body of a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Deleted {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: Status,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: Status::new(status, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageRequest;

    #[test]
    fn test_single_response_shape() {
        let body = serde_json::to_value(SingleResponse::created("x")).unwrap();
        assert_eq!(body["status"]["code"], 201);
        assert_eq!(body["status"]["message"], "Created");
        assert_eq!(body["data"], "x");
    }

    #[test]
    fn test_paged_response_shape() {
        let page = Page::new(vec![1, 2], PageRequest::new(Some(1), Some(2)), 5);
        let body = serde_json::to_value(PagedResponse::from(page)).unwrap();
        assert_eq!(body["status"]["code"], 200);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["paging"]["page"], 1);
        assert_eq!(body["paging"]["rows_per_page"], 2);
        assert_eq!(body["paging"]["total_rows"], 5);
        assert_eq!(body["paging"]["total_pages"], 3);
    }

    #[test]
    fn test_error_response_has_no_data() {
        let body = serde_json::to_value(ErrorResponse::new(StatusCode::NOT_FOUND, "gone")).unwrap();
        assert_eq!(body["status"]["code"], 404);
        assert!(body.get("data").is_none());
    }
}
