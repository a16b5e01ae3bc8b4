use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use instructor_auth::Role;
use instructor_core::PageRequest;
use instructor_core::serde::{
    deserialize_optional_date, deserialize_optional_from_str, deserialize_optional_i64,
};

use crate::questions::Question;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub id: Uuid,
    /// Owner of the schedule
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Link to the session documentation, once recorded
    pub documentation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A schedule together with the questions raised against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleWithQuestions {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub date: Option<NaiveDate>,
    /// Role of the owning user
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateScheduleDto {
    /// Owner of the schedule; defaults to the caller
    pub user_id: Option<Uuid>,
    /// Session date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Start time (HH:MM:SS)
    pub start_time: NaiveTime,
    /// End time (HH:MM:SS), after `start_time`
    pub end_time: NaiveTime,
    #[validate(url(message = "documentation must be a valid URL"))]
    pub documentation: Option<String>,
}

impl CreateScheduleDto {
    pub fn has_valid_time_range(&self) -> bool {
        self.start_time < self.end_time
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateDocumentationDto {
    #[validate(url(message = "documentation must be a valid URL"))]
    pub documentation: String,
}

/// Query parameters for listing schedules.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScheduleFilterParams {
    /// Page number (1-indexed, default 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Rows per page (default 10, max 100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub size: Option<i64>,
    /// Only schedules on this date (YYYY-MM-DD)
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    /// Only schedules owned by users with this role
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub role: Option<Role>,
}

impl ScheduleFilterParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }

    pub fn filter(&self) -> ScheduleFilter {
        ScheduleFilter {
            date: self.date,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(start: (u32, u32), end: (u32, u32)) -> CreateScheduleDto {
        CreateScheduleDto {
            user_id: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            documentation: None,
        }
    }

    #[test]
    fn test_create_schedule_time_range() {
        assert!(dto((9, 0), (12, 0)).has_valid_time_range());
        assert!(!dto((12, 0), (9, 0)).has_valid_time_range());
        assert!(!dto((9, 0), (9, 0)).has_valid_time_range());
    }

    #[test]
    fn test_create_schedule_documentation_url() {
        let mut with_doc = dto((9, 0), (10, 0));
        with_doc.documentation = Some("https://docs.camp.dev/session-1".to_string());
        assert!(with_doc.validate().is_ok());

        with_doc.documentation = Some("not a url".to_string());
        assert!(with_doc.validate().is_err());
    }

    #[test]
    fn test_create_schedule_dto_deserialize() {
        let json = r#"{"date":"2025-03-10","start_time":"09:00:00","end_time":"11:30:00"}"#;
        let dto: CreateScheduleDto = serde_json::from_str(json).unwrap();
        assert!(dto.user_id.is_none());
        assert_eq!(dto.end_time, NaiveTime::from_hms_opt(11, 30, 0).unwrap());
    }

    #[test]
    fn test_schedule_with_questions_is_flat() {
        let schedule = Schedule {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            documentation: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(ScheduleWithQuestions {
            schedule,
            questions: vec![],
        })
        .unwrap();
        assert_eq!(value["date"], "2025-03-10");
        assert!(value["questions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_schedule_filter_params() {
        let params: ScheduleFilterParams =
            serde_json::from_str(r#"{"date":"2025-03-10","role":"TRAINER","size":""}"#).unwrap();
        let filter = params.filter();
        assert_eq!(filter.date, NaiveDate::from_ymd_opt(2025, 3, 10));
        assert_eq!(filter.role, Some(Role::Trainer));
        assert_eq!(params.page_request().size(), 10);
    }
}
