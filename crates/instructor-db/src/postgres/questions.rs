use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use instructor_core::{Page, PageRequest};
use instructor_models::questions::{NewQuestion, Question, QuestionFilter, QuestionStatus};

use super::snapshot;
use crate::error::StorageError;
use crate::repository::QuestionRepository;

const QUESTION_COLUMNS: &str =
    "id, user_id, schedule_id, description, status, created_at, updated_at";

const QUESTION_FILTER: &str = "deleted_at IS NULL
    AND ($1::uuid IS NULL OR schedule_id = $1)
    AND ($2::question_status IS NULL OR status = $2)";

#[derive(Clone)]
pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    #[instrument(skip(self, question), fields(schedule_id = %question.schedule_id))]
    async fn create(&self, question: NewQuestion) -> Result<Question, StorageError> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "INSERT INTO questions (user_id, schedule_id, description)
             VALUES ($1, $2, $3)
             RETURNING {QUESTION_COLUMNS}"
        ))
        .bind(question.user_id)
        .bind(question.schedule_id)
        .bind(&question.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(question)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: &QuestionFilter,
        page: PageRequest,
    ) -> Result<Page<Question>, StorageError> {
        let mut tx = snapshot(&self.pool).await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM questions WHERE {QUESTION_FILTER}"
        ))
        .bind(filter.schedule_id)
        .bind(filter.status)
        .fetch_one(&mut *tx)
        .await?;

        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions
             WHERE {QUESTION_FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filter.schedule_id)
        .bind(filter.status)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Page::new(questions, page, total))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Question>, StorageError> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    #[instrument(skip(self))]
    async fn list_by_schedules(
        &self,
        schedule_ids: &[Uuid],
    ) -> Result<Vec<Question>, StorageError> {
        if schedule_ids.is_empty() {
            return Ok(Vec::new());
        }

        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions
             WHERE schedule_id = ANY($1) AND deleted_at IS NULL
             ORDER BY created_at DESC"
        ))
        .bind(schedule_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: Uuid,
        status: QuestionStatus,
    ) -> Result<Option<Question>, StorageError> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "UPDATE questions SET status = $2, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {QUESTION_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE questions SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
