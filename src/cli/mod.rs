//! Administrative commands run outside the HTTP server.

use anyhow::anyhow;
use validator::Validate;

use instructor_auth::Role;
use instructor_core::AppError;
use instructor_db::Store;
use instructor_models::users::{CreateUserDto, User};

use crate::modules::users::service::UserService;

/// Creates an ADMIN account. This is how the first account comes to exist, since every
/// user-management route already requires an admin token.
pub async fn create_admin(
    store: &Store,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let dto = CreateUserDto {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
        role: Role::Admin,
    };

    dto.validate()
        .map_err(|errors| AppError::unprocessable(anyhow!("{}", errors)))?;

    UserService::create_user(store, dto).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_create_admin() {
        let store = Store::in_memory();

        let user = create_admin(&store, " Root ", "root@camp.dev", "password123")
            .await
            .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.name, "Root");

        let err = create_admin(&store, "Root", "root@camp.dev", "password123")
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_create_admin_validates_input() {
        let store = Store::in_memory();

        let err = create_admin(&store, "Root", "not-an-email", "password123")
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
