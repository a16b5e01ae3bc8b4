use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use instructor_core::{Page, PageRequest};
use instructor_models::schedules::{NewSchedule, Schedule, ScheduleFilter};

use super::snapshot;
use crate::error::StorageError;
use crate::repository::ScheduleRepository;

const SCHEDULE_COLUMNS: &str =
    "s.id, s.user_id, s.date, s.start_time, s.end_time, s.documentation, s.created_at, s.updated_at";

/// `u` is the owner whether or not it is soft-deleted; schedules outlive their owner.
const SCHEDULE_FILTER: &str = "s.deleted_at IS NULL
    AND ($1::date IS NULL OR s.date = $1)
    AND ($2::user_role IS NULL OR u.role = $2)";

#[derive(Clone)]
pub struct PgScheduleRepository {
    pool: PgPool,
}

impl PgScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for PgScheduleRepository {
    #[instrument(skip(self))]
    async fn create(&self, schedule: NewSchedule) -> Result<Schedule, StorageError> {
        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            "INSERT INTO schedules AS s (user_id, date, start_time, end_time, documentation)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {SCHEDULE_COLUMNS}"
        ))
        .bind(schedule.user_id)
        .bind(schedule.date)
        .bind(schedule.start_time)
        .bind(schedule.end_time)
        .bind(&schedule.documentation)
        .fetch_one(&self.pool)
        .await?;

        Ok(schedule)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: &ScheduleFilter,
        page: PageRequest,
    ) -> Result<Page<Schedule>, StorageError> {
        let mut tx = snapshot(&self.pool).await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM schedules s
             JOIN users u ON u.id = s.user_id
             WHERE {SCHEDULE_FILTER}"
        ))
        .bind(filter.date)
        .bind(filter.role)
        .fetch_one(&mut *tx)
        .await?;

        let schedules = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules s
             JOIN users u ON u.id = s.user_id
             WHERE {SCHEDULE_FILTER}
             ORDER BY s.created_at DESC, s.id DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filter.date)
        .bind(filter.role)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Page::new(schedules, page, total))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Schedule>, StorageError> {
        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules s WHERE s.id = $1 AND s.deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule)
    }

    #[instrument(skip(self))]
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Schedule>, StorageError> {
        let schedules = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules s
             WHERE s.date = $1 AND s.deleted_at IS NULL
             ORDER BY s.start_time ASC, s.created_at DESC"
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(schedules)
    }

    #[instrument(skip(self))]
    async fn set_documentation(
        &self,
        id: Uuid,
        documentation: String,
    ) -> Result<Option<Schedule>, StorageError> {
        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            "UPDATE schedules AS s SET documentation = $2, updated_at = NOW()
             WHERE s.id = $1 AND s.deleted_at IS NULL
             RETURNING {SCHEDULE_COLUMNS}"
        ))
        .bind(id)
        .bind(documentation)
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE schedules SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
