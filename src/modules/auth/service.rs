use tracing::instrument;

use instructor_auth::TokenService;
use instructor_core::{AppError, verify_password};
use instructor_db::{Store, StorageError};
use instructor_models::auth::{LoginRequest, LoginResponse};

pub struct AuthService;

impl AuthService {
    /// Unknown email and wrong password fail identically.
    #[instrument(skip(store, tokens))]
    pub async fn login_user(
        store: &Store,
        tokens: &TokenService,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let credential = store
            .users
            .find_credential_by_email(&dto.email)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(AppError::invalid_credentials)?;

        if !verify_password(&dto.password, &credential.password) {
            return Err(AppError::invalid_credentials());
        }

        let token = tokens
            .issue(credential.id, credential.role)
            .map_err(AppError::internal)?;

        tracing::info!(user_id = %credential.id, role = %credential.role, "User logged in");

        Ok(LoginResponse { token })
    }
}
