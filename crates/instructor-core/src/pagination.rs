//! Page-based pagination shared by every list endpoint.
//!
//! List endpoints accept `page` and `size` query parameters:
//!
//! - `page`: 1-indexed page number, default 1
//! - `size`: rows per page, default 10, capped at [`MAX_PAGE_SIZE`]
//!
//! Missing, empty, zero or negative values fall back to the defaults. A value that is not
//! an integer is rejected by the query extractor with a 400.
//!
//! Storage implementations run two reads per page: the row window ordered by
//! `created_at DESC` and a count over the same filter. The results are combined with
//! [`Page::new`]:
//!
//! ```ignore
//! let request = filter.page_request();
//! let rows = fetch_window(request.limit(), request.offset()).await?;
//! let total = count_rows().await?;
//! Ok(Page::new(rows, request, total))
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: i64,
    size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Builds a request from raw query values, substituting defaults for absent or
    /// non-positive input.
    #[must_use]
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let size = size
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        Self { page, size }
    }

    #[must_use]
    pub fn page(&self) -> i64 {
        self.page
    }

    #[must_use]
    pub fn size(&self) -> i64 {
        self.size
    }

    /// SQL `LIMIT`.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.size
    }

    /// SQL `OFFSET`: `(page - 1) * size`.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }
}

/// Paging metadata returned next to every list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Paging {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Page size that was applied
    pub rows_per_page: i64,
    /// Rows matching the filter across all pages
    pub total_rows: i64,
    /// `ceil(total_rows / rows_per_page)`
    pub total_pages: i64,
}

impl Paging {
    #[must_use]
    pub fn new(request: PageRequest, total_rows: i64) -> Self {
        let total_rows = total_rows.max(0);
        let total_pages = (total_rows + request.size - 1) / request.size;

        Self {
            page: request.page,
            rows_per_page: request.size,
            total_rows,
            total_pages,
        }
    }
}

/// One window of an ordered result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub paging: Paging,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_rows: i64) -> Self {
        Self {
            items,
            paging: Paging::new(request, total_rows),
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            paging: self.paging,
        }
    }
}
