//! Authentication and role-based access control.
//!
//! - [`auth`]: the [`AuthUser`](auth::AuthUser) extractor and bearer header parsing
//! - [`role`]: the per-route allow-list middleware
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`require_roles`](role::require_roles) verifies the token (401 on failure)
//! 3. The caller's role is checked against the route's allow-list (403 on failure)
//! 4. The claims are stored as an `AuthUser` and the handler executes
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn get_profile(auth_user: AuthUser) -> Result<impl IntoResponse, AppError> {
//!     let user_id = auth_user.user_id()?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod role;
