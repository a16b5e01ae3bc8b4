use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use instructor_core::{Page, PageRequest};
use instructor_models::attendance::{Attendance, AttendanceFilter};

use super::snapshot;
use crate::error::{DUPLICATE_ATTENDANCE, StorageError};
use crate::repository::AttendanceRepository;

const ATTENDANCE_COLUMNS: &str = "id, user_id, schedule_id, created_at, updated_at";

const ATTENDANCE_FILTER: &str = "deleted_at IS NULL
    AND ($1::uuid IS NULL OR schedule_id = $1)
    AND ($2::uuid IS NULL OR user_id = $2)";

#[derive(Clone)]
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    #[instrument(skip(self))]
    async fn create(&self, user_id: Uuid, schedule_id: Uuid) -> Result<Attendance, StorageError> {
        sqlx::query_as::<_, Attendance>(&format!(
            "INSERT INTO attendance (user_id, schedule_id)
             VALUES ($1, $2)
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(schedule_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::from_write(e, DUPLICATE_ATTENDANCE))
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: &AttendanceFilter,
        page: PageRequest,
    ) -> Result<Page<Attendance>, StorageError> {
        let mut tx = snapshot(&self.pool).await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM attendance WHERE {ATTENDANCE_FILTER}"
        ))
        .bind(filter.schedule_id)
        .bind(filter.user_id)
        .fetch_one(&mut *tx)
        .await?;

        let records = sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance
             WHERE {ATTENDANCE_FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filter.schedule_id)
        .bind(filter.user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Page::new(records, page, total))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendance>, StorageError> {
        let record = sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn find_by_pair(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<Option<Attendance>, StorageError> {
        let record = sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance
             WHERE user_id = $1 AND schedule_id = $2 AND deleted_at IS NULL"
        ))
        .bind(user_id)
        .bind(schedule_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE attendance SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
