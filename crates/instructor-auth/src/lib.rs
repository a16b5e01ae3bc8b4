//! # Instructor Auth
//!
//! Authentication primitives for the instructor-led API.
//!
//! - [`role`]: the closed set of roles used for route authorization
//! - [`claims`]: the JWT payload (subject, role, issuer, issued-at, expiry)
//! - [`jwt`]: [`TokenService`], which issues and verifies HS256 tokens
//!
//! Tokens are stateless. Validity depends only on the signature, the issuer and the
//! expiry, so there is no revocation: a token stays usable until it expires even if the
//! user is deleted or changes role in the meantime.
//!
//! # Example
//!
//! ```ignore
//! use instructor_auth::{Role, TokenService};
//! use instructor_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env());
//! let token = tokens.issue(user_id, Role::Trainer)?;
//! let claims = tokens.verify(&token)?;
//! assert_eq!(claims.role, Role::Trainer);
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

pub use claims::Claims;
pub use jwt::{TokenError, TokenService};
pub use role::Role;
