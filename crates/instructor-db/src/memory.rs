//! In-process storage backend used by tests.
//!
//! Mirrors the PostgreSQL backend's observable behavior: soft deletes, `created_at DESC`
//! ordering, live-row uniqueness of emails and attendance pairs. All four repositories
//! share one lock, so a paged read sees a consistent snapshot.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use instructor_core::{Page, PageRequest};
use instructor_models::attendance::{Attendance, AttendanceFilter};
use instructor_models::questions::{NewQuestion, Question, QuestionFilter, QuestionStatus};
use instructor_models::schedules::{NewSchedule, Schedule, ScheduleFilter};
use instructor_models::users::{NewUser, User, UserChanges, UserCredential, UserFilter};

use crate::error::{DUPLICATE_ATTENDANCE, DUPLICATE_EMAIL, StorageError};
use crate::repository::{
    AttendanceRepository, QuestionRepository, ScheduleRepository, UserRepository,
};

struct Row<T> {
    seq: u64,
    value: T,
    deleted: bool,
}

#[derive(Clone)]
struct StoredUser {
    user: User,
    password: String,
}

#[derive(Default)]
struct Tables {
    next_seq: u64,
    users: Vec<Row<StoredUser>>,
    schedules: Vec<Row<Schedule>>,
    questions: Vec<Row<Question>>,
    attendance: Vec<Row<Attendance>>,
}

impl Tables {
    fn seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn live_user(&self, id: Uuid) -> Option<&StoredUser> {
        self.users
            .iter()
            .find(|row| !row.deleted && row.value.user.id == id)
            .map(|row| &row.value)
    }

    /// Soft-deleted users included; their schedules stay listed under their role.
    fn owner(&self, id: Uuid) -> Option<&StoredUser> {
        self.users
            .iter()
            .find(|row| row.value.user.id == id)
            .map(|row| &row.value)
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users.iter().any(|row| {
            !row.deleted && row.value.user.email == email && Some(row.value.user.id) != except
        })
    }
}

/// Filters live rows, orders them newest first and cuts out one window.
fn page_of<T, K, F>(rows: &[Row<T>], page: PageRequest, created_at: K, keep: F) -> Page<T>
where
    T: Clone,
    K: Fn(&T) -> DateTime<Utc>,
    F: Fn(&T) -> bool,
{
    let mut matching: Vec<&Row<T>> = rows
        .iter()
        .filter(|row| !row.deleted && keep(&row.value))
        .collect();
    matching.sort_by(|a, b| {
        created_at(&b.value)
            .cmp(&created_at(&a.value))
            .then(b.seq.cmp(&a.seq))
    });

    let total = matching.len() as i64;
    let items = matching
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .map(|row| row.value.clone())
        .collect();

    Page::new(items, page, total)
}

fn soft_delete_where<T, F>(rows: &mut [Row<T>], matches: F) -> bool
where
    F: Fn(&T) -> bool,
{
    match rows.iter_mut().find(|row| !row.deleted && matches(&row.value)) {
        Some(row) => {
            row.deleted = true;
            true
        }
        None => false,
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, StorageError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(StorageError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let now = Utc::now();
        let stored = StoredUser {
            user: User {
                id: Uuid::new_v4(),
                name: user.name,
                email: user.email,
                role: user.role,
                created_at: now,
                updated_at: now,
            },
            password: user.password,
        };
        let created = stored.user.clone();
        let seq = tables.seq();
        tables.users.push(Row {
            seq,
            value: stored,
            deleted: false,
        });

        Ok(created)
    }

    async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<User>, StorageError> {
        let tables = self.tables.read().await;
        let page = page_of(
            &tables.users,
            page,
            |stored| stored.user.created_at,
            |stored| filter.role.is_none_or(|role| stored.user.role == role),
        );
        Ok(page.map(|stored| stored.user))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.live_user(id).map(|stored| stored.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|row| !row.deleted && row.value.user.email == email)
            .map(|row| row.value.user.clone()))
    }

    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredential>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|row| !row.deleted && row.value.user.email == email)
            .map(|row| UserCredential {
                id: row.value.user.id,
                email: row.value.user.email.clone(),
                password: row.value.password.clone(),
                role: row.value.user.role,
            }))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, StorageError> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &changes.email
            && tables.email_taken(email, Some(id))
        {
            return Err(StorageError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let Some(row) = tables
            .users
            .iter_mut()
            .find(|row| !row.deleted && row.value.user.id == id)
        else {
            return Ok(None);
        };

        let stored = &mut row.value;
        if let Some(name) = changes.name {
            stored.user.name = name;
        }
        if let Some(email) = changes.email {
            stored.user.email = email;
        }
        if let Some(password) = changes.password {
            stored.password = password;
        }
        if let Some(role) = changes.role {
            stored.user.role = role;
        }
        stored.user.updated_at = Utc::now();

        Ok(Some(stored.user.clone()))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(soft_delete_where(&mut tables.users, |stored| {
            stored.user.id == id
        }))
    }
}

#[async_trait]
impl ScheduleRepository for MemoryStore {
    async fn create(&self, schedule: NewSchedule) -> Result<Schedule, StorageError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let created = Schedule {
            id: Uuid::new_v4(),
            user_id: schedule.user_id,
            date: schedule.date,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            documentation: schedule.documentation,
            created_at: now,
            updated_at: now,
        };
        let seq = tables.seq();
        tables.schedules.push(Row {
            seq,
            value: created.clone(),
            deleted: false,
        });

        Ok(created)
    }

    async fn list(
        &self,
        filter: &ScheduleFilter,
        page: PageRequest,
    ) -> Result<Page<Schedule>, StorageError> {
        let tables = self.tables.read().await;
        Ok(page_of(
            &tables.schedules,
            page,
            |schedule| schedule.created_at,
            |schedule| {
                filter.date.is_none_or(|date| schedule.date == date)
                    && filter.role.is_none_or(|role| {
                        tables
                            .owner(schedule.user_id)
                            .is_some_and(|owner| owner.user.role == role)
                    })
            },
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Schedule>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .schedules
            .iter()
            .find(|row| !row.deleted && row.value.id == id)
            .map(|row| row.value.clone()))
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Schedule>, StorageError> {
        let tables = self.tables.read().await;
        let mut schedules: Vec<Schedule> = tables
            .schedules
            .iter()
            .filter(|row| !row.deleted && row.value.date == date)
            .map(|row| row.value.clone())
            .collect();
        schedules.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(schedules)
    }

    async fn set_documentation(
        &self,
        id: Uuid,
        documentation: String,
    ) -> Result<Option<Schedule>, StorageError> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables
            .schedules
            .iter_mut()
            .find(|row| !row.deleted && row.value.id == id)
        else {
            return Ok(None);
        };

        row.value.documentation = Some(documentation);
        row.value.updated_at = Utc::now();
        Ok(Some(row.value.clone()))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(soft_delete_where(&mut tables.schedules, |schedule| {
            schedule.id == id
        }))
    }
}

#[async_trait]
impl QuestionRepository for MemoryStore {
    async fn create(&self, question: NewQuestion) -> Result<Question, StorageError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let created = Question {
            id: Uuid::new_v4(),
            user_id: question.user_id,
            schedule_id: question.schedule_id,
            description: question.description,
            status: QuestionStatus::default(),
            created_at: now,
            updated_at: now,
        };
        let seq = tables.seq();
        tables.questions.push(Row {
            seq,
            value: created.clone(),
            deleted: false,
        });

        Ok(created)
    }

    async fn list(
        &self,
        filter: &QuestionFilter,
        page: PageRequest,
    ) -> Result<Page<Question>, StorageError> {
        let tables = self.tables.read().await;
        Ok(page_of(
            &tables.questions,
            page,
            |question| question.created_at,
            |question| {
                filter.schedule_id.is_none_or(|id| question.schedule_id == id)
                    && filter.status.is_none_or(|status| question.status == status)
            },
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Question>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .iter()
            .find(|row| !row.deleted && row.value.id == id)
            .map(|row| row.value.clone()))
    }

    async fn list_by_schedules(
        &self,
        schedule_ids: &[Uuid],
    ) -> Result<Vec<Question>, StorageError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<&Row<Question>> = tables
            .questions
            .iter()
            .filter(|row| !row.deleted && schedule_ids.contains(&row.value.schedule_id))
            .collect();
        rows.sort_by(|a, b| {
            b.value
                .created_at
                .cmp(&a.value.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(rows.into_iter().map(|row| row.value.clone()).collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: QuestionStatus,
    ) -> Result<Option<Question>, StorageError> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables
            .questions
            .iter_mut()
            .find(|row| !row.deleted && row.value.id == id)
        else {
            return Ok(None);
        };

        row.value.status = status;
        row.value.updated_at = Utc::now();
        Ok(Some(row.value.clone()))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(soft_delete_where(&mut tables.questions, |question| {
            question.id == id
        }))
    }
}

#[async_trait]
impl AttendanceRepository for MemoryStore {
    async fn create(&self, user_id: Uuid, schedule_id: Uuid) -> Result<Attendance, StorageError> {
        let mut tables = self.tables.write().await;
        let duplicate = tables.attendance.iter().any(|row| {
            !row.deleted && row.value.user_id == user_id && row.value.schedule_id == schedule_id
        });
        if duplicate {
            return Err(StorageError::Conflict(DUPLICATE_ATTENDANCE.to_string()));
        }

        let now = Utc::now();
        let created = Attendance {
            id: Uuid::new_v4(),
            user_id,
            schedule_id,
            created_at: now,
            updated_at: now,
        };
        let seq = tables.seq();
        tables.attendance.push(Row {
            seq,
            value: created.clone(),
            deleted: false,
        });

        Ok(created)
    }

    async fn list(
        &self,
        filter: &AttendanceFilter,
        page: PageRequest,
    ) -> Result<Page<Attendance>, StorageError> {
        let tables = self.tables.read().await;
        Ok(page_of(
            &tables.attendance,
            page,
            |record| record.created_at,
            |record| {
                filter.schedule_id.is_none_or(|id| record.schedule_id == id)
                    && filter.user_id.is_none_or(|id| record.user_id == id)
            },
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendance>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .attendance
            .iter()
            .find(|row| !row.deleted && row.value.id == id)
            .map(|row| row.value.clone()))
    }

    async fn find_by_pair(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<Option<Attendance>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .attendance
            .iter()
            .find(|row| {
                !row.deleted
                    && row.value.user_id == user_id
                    && row.value.schedule_id == schedule_id
            })
            .map(|row| row.value.clone()))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut tables = self.tables.write().await;
        Ok(soft_delete_where(&mut tables.attendance, |record| {
            record.id == id
        }))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use instructor_models::Role;

    use super::*;
    use crate::Store;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: "digest".to_string(),
            role,
        }
    }

    fn new_schedule(user_id: Uuid, day: u32) -> NewSchedule {
        NewSchedule {
            user_id,
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            documentation: None,
        }
    }

    #[tokio::test]
    async fn test_pagination_over_25_records() {
        let store = Store::in_memory();
        for i in 0..25 {
            store
                .users
                .create(new_user(&format!("user{i}@camp.dev"), Role::Participant))
                .await
                .unwrap();
        }
        let filter = UserFilter::default();

        let first = store
            .users
            .list(&filter, PageRequest::new(Some(1), Some(10)))
            .await
            .unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.paging.total_rows, 25);
        assert_eq!(first.paging.total_pages, 3);

        let third = store
            .users
            .list(&filter, PageRequest::new(Some(3), Some(10)))
            .await
            .unwrap();
        assert_eq!(third.items.len(), 5);

        let fourth = store
            .users
            .list(&filter, PageRequest::new(Some(4), Some(10)))
            .await
            .unwrap();
        assert!(fourth.items.is_empty());
        assert_eq!(fourth.paging.total_pages, 3);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = Store::in_memory();
        for i in 0..3 {
            store
                .users
                .create(new_user(&format!("order{i}@camp.dev"), Role::Trainer))
                .await
                .unwrap();
        }

        let page = store
            .users
            .list(&UserFilter::default(), PageRequest::default())
            .await
            .unwrap();
        let emails: Vec<&str> = page.items.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(
            emails,
            vec!["order2@camp.dev", "order1@camp.dev", "order0@camp.dev"]
        );
    }

    #[tokio::test]
    async fn test_role_filter_narrows_count() {
        let store = Store::in_memory();
        store
            .users
            .create(new_user("t@camp.dev", Role::Trainer))
            .await
            .unwrap();
        store
            .users
            .create(new_user("p@camp.dev", Role::Participant))
            .await
            .unwrap();

        let filter = UserFilter {
            role: Some(Role::Trainer),
        };
        let page = store
            .users
            .list(&filter, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.paging.total_rows, 1);
        assert_eq!(page.items[0].role, Role::Trainer);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_until_deleted() {
        let store = Store::in_memory();
        let user = store
            .users
            .create(new_user("dup@camp.dev", Role::Admin))
            .await
            .unwrap();

        let err = store
            .users
            .create(new_user("dup@camp.dev", Role::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        assert!(store.users.soft_delete(user.id).await.unwrap());
        assert!(
            store
                .users
                .create(new_user("dup@camp.dev", Role::Admin))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_soft_deleted_rows_are_hidden() {
        let store = Store::in_memory();
        let owner = store
            .users
            .create(new_user("owner@camp.dev", Role::Participant))
            .await
            .unwrap();
        let schedule = store
            .schedules
            .create(new_schedule(owner.id, 10))
            .await
            .unwrap();

        assert!(store.schedules.soft_delete(schedule.id).await.unwrap());
        assert!(!store.schedules.soft_delete(schedule.id).await.unwrap());
        assert!(
            store
                .schedules
                .find_by_id(schedule.id)
                .await
                .unwrap()
                .is_none()
        );

        let page = store
            .schedules
            .list(&ScheduleFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.paging.total_rows, 0);
    }

    #[tokio::test]
    async fn test_schedule_filters() {
        let store = Store::in_memory();
        let trainer = store
            .users
            .create(new_user("trainer@camp.dev", Role::Trainer))
            .await
            .unwrap();
        let participant = store
            .users
            .create(new_user("participant@camp.dev", Role::Participant))
            .await
            .unwrap();
        store
            .schedules
            .create(new_schedule(trainer.id, 10))
            .await
            .unwrap();
        store
            .schedules
            .create(new_schedule(participant.id, 10))
            .await
            .unwrap();
        store
            .schedules
            .create(new_schedule(participant.id, 11))
            .await
            .unwrap();

        let by_date = ScheduleFilter {
            date: NaiveDate::from_ymd_opt(2025, 3, 10),
            role: None,
        };
        let page = store
            .schedules
            .list(&by_date, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.paging.total_rows, 2);

        let by_role = ScheduleFilter {
            date: None,
            role: Some(Role::Participant),
        };
        let page = store
            .schedules
            .list(&by_role, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.paging.total_rows, 2);
        assert!(page.items.iter().all(|s| s.user_id == participant.id));
    }

    #[tokio::test]
    async fn test_role_filter_keeps_schedules_of_deleted_owner() {
        let store = Store::in_memory();
        let participant = store
            .users
            .create(new_user("gone@example.com", Role::Participant))
            .await
            .unwrap();
        store
            .schedules
            .create(new_schedule(participant.id, 10))
            .await
            .unwrap();
        assert!(store.users.soft_delete(participant.id).await.unwrap());

        let by_role = ScheduleFilter {
            date: None,
            role: Some(Role::Participant),
        };
        let page = store
            .schedules
            .list(&by_role, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.paging.total_rows, 1);
    }

    #[tokio::test]
    async fn test_duplicate_attendance_conflicts() {
        let store = Store::in_memory();
        let (user_id, schedule_id) = (Uuid::new_v4(), Uuid::new_v4());
        let record = store.attendance.create(user_id, schedule_id).await.unwrap();

        let err = store
            .attendance
            .create(user_id, schedule_id)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        let found = store
            .attendance
            .find_by_pair(user_id, schedule_id)
            .await
            .unwrap();
        assert_eq!(found.map(|r| r.id), Some(record.id));
    }

    #[tokio::test]
    async fn test_question_status_update() {
        let store = Store::in_memory();
        let question = store
            .questions
            .create(NewQuestion {
                user_id: Uuid::new_v4(),
                schedule_id: Uuid::new_v4(),
                description: "Why Pin?".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(question.status, QuestionStatus::Processed);

        let updated = store
            .questions
            .update_status(question.id, QuestionStatus::Answered)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, QuestionStatus::Answered);

        assert!(
            store
                .questions
                .update_status(Uuid::new_v4(), QuestionStatus::Answered)
                .await
                .unwrap()
                .is_none()
        );
    }
}
