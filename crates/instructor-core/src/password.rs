use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// bcrypt rejects costs outside 4..=31. Passwords longer than [`MAX_PASSWORD_BYTES`] are
/// refused with a 422 rather than hashed by their prefix.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::unprocessable(anyhow!(
            "password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }

    hash(password, cost)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Returns `false` for a wrong password and for a digest bcrypt cannot parse.
pub fn verify_password(password: &str, digest: &str) -> bool {
    // No stored digest was made from a longer input.
    if password.len() > MAX_PASSWORD_BYTES {
        return false;
    }

    match verify(password, digest) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password digest could not be verified");
            false
        }
    }
}
