//! # Instructor Core
//!
//! Foundational types shared by every crate of the instructor-led API:
//!
//! - [`errors`]: the application error type and its HTTP mapping
//! - [`response`]: the `{status, data, paging}` response envelopes
//! - [`pagination`]: page requests, paging metadata and query parsing
//! - [`password`]: bcrypt hashing and verification
//! - [`serde`]: lenient deserializers for query-string values
//!
//! # Example
//!
//! ```ignore
//! use instructor_core::errors::AppError;
//! use instructor_core::pagination::{Page, PageRequest};
//! use instructor_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Schedule not found"));
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash));
//!
//! let request = PageRequest::new(Some(2), Some(10));
//! assert_eq!(request.offset(), 10);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod response;
pub mod serde;

pub use errors::AppError;
pub use pagination::{Page, PageRequest, Paging};
pub use password::{hash_password, verify_password};
pub use response::{Deleted, ErrorResponse, PagedResponse, SingleResponse, Status};
