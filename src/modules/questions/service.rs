use std::collections::HashMap;

use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use instructor_core::{AppError, Page};
use instructor_db::{Store, StorageError};
use instructor_models::questions::{
    CreateQuestionDto, NewQuestion, Question, QuestionFilterParams, QuestionsByDateParams,
    UpdateQuestionStatusDto,
};
use instructor_models::schedules::ScheduleWithQuestions;

pub struct QuestionService;

fn question_not_found() -> AppError {
    AppError::not_found(anyhow!("Question not found"))
}

impl QuestionService {
    /// The caller becomes the author; new questions start as `PROCESSED`.
    #[instrument(skip(store))]
    pub async fn create_question(
        store: &Store,
        author_id: Uuid,
        dto: CreateQuestionDto,
    ) -> Result<Question, AppError> {
        store
            .schedules
            .find_by_id(dto.schedule_id)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(|| AppError::not_found(anyhow!("Schedule not found")))?;

        let question = store
            .questions
            .create(NewQuestion {
                user_id: author_id,
                schedule_id: dto.schedule_id,
                description: dto.description,
            })
            .await
            .map_err(StorageError::into_app_error)?;

        tracing::info!(question_id = %question.id, schedule_id = %question.schedule_id, "Question created");
        Ok(question)
    }

    #[instrument(skip(store))]
    pub async fn get_questions(
        store: &Store,
        params: QuestionFilterParams,
    ) -> Result<Page<Question>, AppError> {
        store
            .questions
            .list(&params.filter(), params.page_request())
            .await
            .map_err(StorageError::into_app_error)
    }

    /// Every schedule on the date with the questions raised against it.
    #[instrument(skip(store))]
    pub async fn get_questions_by_date(
        store: &Store,
        params: QuestionsByDateParams,
    ) -> Result<Vec<ScheduleWithQuestions>, AppError> {
        let schedules = store
            .schedules
            .list_by_date(params.date)
            .await
            .map_err(StorageError::into_app_error)?;

        if schedules.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = schedules.iter().map(|s| s.id).collect();
        let questions = store
            .questions
            .list_by_schedules(&ids)
            .await
            .map_err(StorageError::into_app_error)?;

        let mut by_schedule: HashMap<Uuid, Vec<Question>> = HashMap::new();
        for question in questions {
            by_schedule
                .entry(question.schedule_id)
                .or_default()
                .push(question);
        }

        Ok(schedules
            .into_iter()
            .map(|schedule| ScheduleWithQuestions {
                questions: by_schedule.remove(&schedule.id).unwrap_or_default(),
                schedule,
            })
            .collect())
    }

    #[instrument(skip(store))]
    pub async fn get_question(store: &Store, id: Uuid) -> Result<Question, AppError> {
        store
            .questions
            .find_by_id(id)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(question_not_found)
    }

    #[instrument(skip(store))]
    pub async fn update_status(
        store: &Store,
        id: Uuid,
        dto: UpdateQuestionStatusDto,
    ) -> Result<Question, AppError> {
        store
            .questions
            .update_status(id, dto.status)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(question_not_found)
    }

    #[instrument(skip(store))]
    pub async fn delete_question(store: &Store, id: Uuid) -> Result<(), AppError> {
        let deleted = store
            .questions
            .soft_delete(id)
            .await
            .map_err(StorageError::into_app_error)?;

        if !deleted {
            return Err(question_not_found());
        }

        tracing::info!(question_id = %id, "Question deleted");
        Ok(())
    }
}
