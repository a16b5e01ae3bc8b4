use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use instructor_auth::Role;
use instructor_core::PageRequest;
use instructor_core::password::MAX_PASSWORD_BYTES;
use instructor_core::serde::{deserialize_optional_from_str, deserialize_optional_i64};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Login lookup row. Never serialized.
#[derive(Clone, FromRow)]
pub struct UserCredential {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Insert payload; `password` is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Partial update; `password` is already hashed.
#[derive(Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<Role>,
}

/// Counted in bytes, not characters.
fn password_fits_bcrypt(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message("password must be at most 72 bytes".into()));
    }
    Ok(())
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(
        length(min = 8, message = "password must be at least 8 characters"),
        custom(function = "password_fits_bcrypt")
    )]
    pub password: String,
    pub role: Role,
}

impl std::fmt::Debug for CreateUserDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserDto")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(
        length(min = 8, message = "password must be at least 8 characters"),
        custom(function = "password_fits_bcrypt")
    )]
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl std::fmt::Debug for UpdateUserDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUserDto")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_changed", &self.password.is_some())
            .field("role", &self.role)
            .finish()
    }
}

/// Query parameters for listing users.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilterParams {
    /// Page number (1-indexed, default 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Rows per page (default 10, max 100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub size: Option<i64>,
    /// Only users with this role
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub role: Option<Role>,
}

impl UserFilterParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }

    pub fn filter(&self) -> UserFilter {
        UserFilter { role: self.role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto() -> CreateUserDto {
        CreateUserDto {
            name: "Ada Trainer".to_string(),
            email: "ada@camp.dev".to_string(),
            password: "password123".to_string(),
            role: Role::Trainer,
        }
    }

    #[test]
    fn test_create_user_dto_validation() {
        assert!(create_dto().validate().is_ok());

        let short_password = CreateUserDto {
            password: "short".to_string(),
            ..create_dto()
        };
        assert!(short_password.validate().is_err());

        let empty_name = CreateUserDto {
            name: String::new(),
            ..create_dto()
        };
        assert!(empty_name.validate().is_err());

        let bad_email = CreateUserDto {
            email: "ada".to_string(),
            ..create_dto()
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_update_user_dto_validation() {
        let empty = UpdateUserDto {
            name: None,
            email: None,
            password: None,
            role: None,
        };
        assert!(empty.validate().is_ok());

        let short_password = UpdateUserDto {
            name: None,
            email: None,
            password: Some("short".to_string()),
            role: None,
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_password_over_72_bytes_is_rejected() {
        let at_limit = CreateUserDto {
            password: "a".repeat(72),
            ..create_dto()
        };
        assert!(at_limit.validate().is_ok());

        let too_long = CreateUserDto {
            password: format!("{}suffix", "a".repeat(72)),
            ..create_dto()
        };
        let errors = too_long.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        let update = UpdateUserDto {
            name: None,
            email: None,
            password: Some("ü".repeat(40)),
            role: None,
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_create_user_dto_debug_hides_password() {
        assert!(!format!("{:?}", create_dto()).contains("password123"));
    }

    #[test]
    fn test_user_serialize_has_no_password() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@camp.dev".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "ADMIN");
    }

    #[test]
    fn test_user_filter_params() {
        let params: UserFilterParams =
            serde_json::from_str(r#"{"page":"2","size":"5","role":"trainer"}"#).unwrap();
        assert_eq!(params.page_request(), PageRequest::new(Some(2), Some(5)));
        assert_eq!(params.filter().role, Some(Role::Trainer));
    }
}
