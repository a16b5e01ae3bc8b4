use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use instructor_core::{AppError, Page, hash_password};
use instructor_db::{Store, StorageError};
use instructor_models::users::{
    CreateUserDto, NewUser, UpdateUserDto, User, UserChanges, UserFilterParams,
};

pub struct UserService;

fn user_not_found() -> AppError {
    AppError::not_found(anyhow!("User not found"))
}

impl UserService {
    #[instrument(skip(store))]
    pub async fn create_user(store: &Store, dto: CreateUserDto) -> Result<User, AppError> {
        let password = hash_password(&dto.password)?;

        let user = store
            .users
            .create(NewUser {
                name: dto.name,
                email: dto.email,
                password,
                role: dto.role,
            })
            .await
            .map_err(StorageError::into_app_error)?;

        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    #[instrument(skip(store))]
    pub async fn get_users(store: &Store, params: UserFilterParams) -> Result<Page<User>, AppError> {
        store
            .users
            .list(&params.filter(), params.page_request())
            .await
            .map_err(StorageError::into_app_error)
    }

    #[instrument(skip(store))]
    pub async fn get_user(store: &Store, id: Uuid) -> Result<User, AppError> {
        store
            .users
            .find_by_id(id)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(user_not_found)
    }

    #[instrument(skip(store))]
    pub async fn get_user_by_email(store: &Store, email: &str) -> Result<User, AppError> {
        store
            .users
            .find_by_email(email)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(user_not_found)
    }

    #[instrument(skip(store))]
    pub async fn update_user(store: &Store, id: Uuid, dto: UpdateUserDto) -> Result<User, AppError> {
        let password = match dto.password {
            Some(password) => Some(hash_password(&password)?),
            None => None,
        };

        let changes = UserChanges {
            name: dto.name,
            email: dto.email,
            password,
            role: dto.role,
        };

        store
            .users
            .update(id, changes)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(user_not_found)
    }

    #[instrument(skip(store))]
    pub async fn delete_user(store: &Store, id: Uuid) -> Result<(), AppError> {
        let deleted = store
            .users
            .soft_delete(id)
            .await
            .map_err(StorageError::into_app_error)?;

        if !deleted {
            return Err(user_not_found());
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
