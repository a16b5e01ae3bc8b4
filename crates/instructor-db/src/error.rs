use thiserror::Error;

use instructor_core::AppError;

pub const DUPLICATE_EMAIL: &str = "A user with this email already exists";
pub const DUPLICATE_ATTENDANCE: &str = "Attendance already exists";

#[derive(Debug, Error)]
pub enum StorageError {
    /// A uniqueness rule was violated, e.g. a duplicate email.
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Maps a write failure, turning unique violations into [`StorageError::Conflict`].
    pub fn from_write(err: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return StorageError::Conflict(conflict_message.to_string());
        }
        StorageError::Database(err)
    }

    /// Conflicts become 409; everything else is a 500 whose detail is only logged.
    pub fn into_app_error(self) -> AppError {
        match self {
            StorageError::Conflict(message) => AppError::conflict(anyhow::anyhow!(message)),
            StorageError::Database(err) => AppError::database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_409() {
        let err = StorageError::Conflict("Email already registered".to_string()).into_app_error();
        assert_eq!(err.status.as_u16(), 409);
        assert_eq!(err.public_message(), "Email already registered");
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let err = StorageError::Database(sqlx::Error::RowNotFound).into_app_error();
        assert_eq!(err.status.as_u16(), 500);
    }

    #[test]
    fn test_non_unique_write_error_is_database() {
        let err = StorageError::from_write(sqlx::Error::PoolTimedOut, "dup");
        assert!(matches!(err, StorageError::Database(_)));
    }
}
