use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use instructor_auth::Role;
use instructor_core::{AppError, Page};
use instructor_db::{Store, StorageError};
use instructor_models::schedules::{
    CreateScheduleDto, NewSchedule, Schedule, ScheduleFilterParams, UpdateDocumentationDto,
};

use crate::middleware::auth::AuthUser;

pub struct ScheduleService;

fn schedule_not_found() -> AppError {
    AppError::not_found(anyhow!("Schedule not found"))
}

impl ScheduleService {
    /// The owner defaults to the caller. Only admins may create schedules for someone
    /// else.
    #[instrument(skip(store))]
    pub async fn create_schedule(
        store: &Store,
        auth_user: &AuthUser,
        dto: CreateScheduleDto,
    ) -> Result<Schedule, AppError> {
        if !dto.has_valid_time_range() {
            return Err(AppError::unprocessable(anyhow!(
                "start_time must be before end_time"
            )));
        }

        let caller_id = auth_user.user_id()?;
        let owner_id = dto.user_id.unwrap_or(caller_id);
        if owner_id != caller_id && !auth_user.has_role(Role::Admin) {
            return Err(AppError::forbidden(
                "Access denied. Only admins can create schedules for other users".to_string(),
            ));
        }

        store
            .users
            .find_by_id(owner_id)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        let schedule = store
            .schedules
            .create(NewSchedule {
                user_id: owner_id,
                date: dto.date,
                start_time: dto.start_time,
                end_time: dto.end_time,
                documentation: dto.documentation,
            })
            .await
            .map_err(StorageError::into_app_error)?;

        tracing::info!(schedule_id = %schedule.id, user_id = %owner_id, "Schedule created");
        Ok(schedule)
    }

    #[instrument(skip(store))]
    pub async fn get_schedules(
        store: &Store,
        params: ScheduleFilterParams,
    ) -> Result<Page<Schedule>, AppError> {
        store
            .schedules
            .list(&params.filter(), params.page_request())
            .await
            .map_err(StorageError::into_app_error)
    }

    #[instrument(skip(store))]
    pub async fn get_schedule(store: &Store, id: Uuid) -> Result<Schedule, AppError> {
        store
            .schedules
            .find_by_id(id)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(schedule_not_found)
    }

    #[instrument(skip(store))]
    pub async fn update_documentation(
        store: &Store,
        id: Uuid,
        dto: UpdateDocumentationDto,
    ) -> Result<Schedule, AppError> {
        store
            .schedules
            .set_documentation(id, dto.documentation)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(schedule_not_found)
    }

    #[instrument(skip(store))]
    pub async fn delete_schedule(store: &Store, id: Uuid) -> Result<(), AppError> {
        let deleted = store
            .schedules
            .soft_delete(id)
            .await
            .map_err(StorageError::into_app_error)?;

        if !deleted {
            return Err(schedule_not_found());
        }

        tracing::info!(schedule_id = %id, "Schedule deleted");
        Ok(())
    }
}
