use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use instructor_core::PageRequest;
use instructor_core::serde::{deserialize_optional_i64, deserialize_optional_uuid};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Attendance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub schedule_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct CreateAttendanceDto {
    /// Participant being checked in
    pub user_id: Uuid,
    pub schedule_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub schedule_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

/// Query parameters for listing attendance records.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceFilterParams {
    /// Page number (1-indexed, default 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Rows per page (default 10, max 100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub size: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub schedule_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub user_id: Option<Uuid>,
}

impl AttendanceFilterParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }

    pub fn filter(&self) -> AttendanceFilter {
        AttendanceFilter {
            schedule_id: self.schedule_id,
            user_id: self.user_id,
        }
    }
}
