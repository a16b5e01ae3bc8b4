use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use instructor_core::{Page, PageRequest};
use instructor_models::users::{NewUser, User, UserChanges, UserCredential, UserFilter};

use super::snapshot;
use crate::error::{DUPLICATE_EMAIL, StorageError};
use crate::repository::UserRepository;

const USER_COLUMNS: &str = "id, name, email, role, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: NewUser) -> Result<User, StorageError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::from_write(e, DUPLICATE_EMAIL))
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<User>, StorageError> {
        let mut tx = snapshot(&self.pool).await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users
             WHERE deleted_at IS NULL AND ($1::user_role IS NULL OR role = $1)",
        )
        .bind(filter.role)
        .fetch_one(&mut *tx)
        .await?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE deleted_at IS NULL AND ($1::user_role IS NULL OR role = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(filter.role)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Page::new(users, page, total))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredential>, StorageError> {
        let credential = sqlx::query_as::<_, UserCredential>(
            "SELECT id, email, password, role FROM users
             WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, StorageError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                 name = COALESCE($2, name),
                 email = COALESCE($3, email),
                 password = COALESCE($4, password),
                 role = COALESCE($5::user_role, role),
                 updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.password)
        .bind(changes.role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::from_write(e, DUPLICATE_EMAIL))
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
