use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use instructor_core::{AppError, Page};
use instructor_db::error::DUPLICATE_ATTENDANCE;
use instructor_db::{Store, StorageError};
use instructor_models::attendance::{Attendance, AttendanceFilterParams, CreateAttendanceDto};

pub struct AttendanceService;

fn attendance_not_found() -> AppError {
    AppError::not_found(anyhow!("Attendance not found"))
}

impl AttendanceService {
    /// Checks a user in to a schedule once. A second live record for the same pair is a
    /// conflict.
    #[instrument(skip(store))]
    pub async fn create_attendance(
        store: &Store,
        dto: CreateAttendanceDto,
    ) -> Result<Attendance, AppError> {
        store
            .users
            .find_by_id(dto.user_id)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        store
            .schedules
            .find_by_id(dto.schedule_id)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(|| AppError::not_found(anyhow!("Schedule not found")))?;

        let existing = store
            .attendance
            .find_by_pair(dto.user_id, dto.schedule_id)
            .await
            .map_err(StorageError::into_app_error)?;
        if existing.is_some() {
            return Err(AppError::conflict(anyhow!(DUPLICATE_ATTENDANCE)));
        }

        // The unique index still guards the race between the check and the insert.
        let attendance = store
            .attendance
            .create(dto.user_id, dto.schedule_id)
            .await
            .map_err(StorageError::into_app_error)?;

        tracing::info!(attendance_id = %attendance.id, "Attendance recorded");
        Ok(attendance)
    }

    #[instrument(skip(store))]
    pub async fn get_attendance(
        store: &Store,
        params: AttendanceFilterParams,
    ) -> Result<Page<Attendance>, AppError> {
        store
            .attendance
            .list(&params.filter(), params.page_request())
            .await
            .map_err(StorageError::into_app_error)
    }

    #[instrument(skip(store))]
    pub async fn get_attendance_by_id(store: &Store, id: Uuid) -> Result<Attendance, AppError> {
        store
            .attendance
            .find_by_id(id)
            .await
            .map_err(StorageError::into_app_error)?
            .ok_or_else(attendance_not_found)
    }

    #[instrument(skip(store))]
    pub async fn delete_attendance(store: &Store, id: Uuid) -> Result<(), AppError> {
        let deleted = store
            .attendance
            .soft_delete(id)
            .await
            .map_err(StorageError::into_app_error)?;

        if !deleted {
            return Err(attendance_not_found());
        }

        tracing::info!(attendance_id = %id, "Attendance deleted");
        Ok(())
    }
}
