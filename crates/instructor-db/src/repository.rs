//! Storage contracts, one trait per resource.
//!
//! Reads and deletes only ever see live rows (`deleted_at IS NULL`). `list` returns one
//! window ordered by `created_at DESC` together with the total number of rows matching
//! the same filter. `soft_delete` and the update methods report a missing row as
//! `false` / `None` instead of an error so services can answer 404.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use instructor_core::{Page, PageRequest};
use instructor_models::attendance::{Attendance, AttendanceFilter};
use instructor_models::questions::{NewQuestion, Question, QuestionFilter, QuestionStatus};
use instructor_models::schedules::{NewSchedule, Schedule, ScheduleFilter};
use instructor_models::users::{NewUser, User, UserChanges, UserCredential, UserFilter};

use crate::error::StorageError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, StorageError>;

    async fn list(&self, filter: &UserFilter, page: PageRequest)
    -> Result<Page<User>, StorageError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError>;

    /// Exact, case-sensitive match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredential>, StorageError>;

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, StorageError>;

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create(&self, schedule: NewSchedule) -> Result<Schedule, StorageError>;

    async fn list(
        &self,
        filter: &ScheduleFilter,
        page: PageRequest,
    ) -> Result<Page<Schedule>, StorageError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Schedule>, StorageError>;

    /// Every live schedule on `date`, earliest start first.
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Schedule>, StorageError>;

    async fn set_documentation(
        &self,
        id: Uuid,
        documentation: String,
    ) -> Result<Option<Schedule>, StorageError>;

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError>;
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: NewQuestion) -> Result<Question, StorageError>;

    async fn list(
        &self,
        filter: &QuestionFilter,
        page: PageRequest,
    ) -> Result<Page<Question>, StorageError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Question>, StorageError>;

    /// Live questions of the given schedules, newest first.
    async fn list_by_schedules(&self, schedule_ids: &[Uuid])
    -> Result<Vec<Question>, StorageError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: QuestionStatus,
    ) -> Result<Option<Question>, StorageError>;

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Fails with [`StorageError::Conflict`] when a live record for the pair exists.
    async fn create(&self, user_id: Uuid, schedule_id: Uuid)
    -> Result<Attendance, StorageError>;

    async fn list(
        &self,
        filter: &AttendanceFilter,
        page: PageRequest,
    ) -> Result<Page<Attendance>, StorageError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendance>, StorageError>;

    async fn find_by_pair(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<Option<Attendance>, StorageError>;

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError>;
}
