use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use instructor_core::PageRequest;
use instructor_core::serde::{
    deserialize_optional_from_str, deserialize_optional_i64, deserialize_optional_uuid,
};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "question_status", rename_all = "UPPERCASE")]
pub enum QuestionStatus {
    /// Raised and waiting for a trainer
    #[default]
    Processed,
    Answered,
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionStatus::Processed => f.write_str("PROCESSED"),
            QuestionStatus::Answered => f.write_str("ANSWERED"),
        }
    }
}

impl FromStr for QuestionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PROCESSED" => Ok(QuestionStatus::Processed),
            "ANSWERED" => Ok(QuestionStatus::Answered),
            _ => Err(format!("unknown question status: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Question {
    pub id: Uuid,
    /// Author of the question
    pub user_id: Uuid,
    pub schedule_id: Uuid,
    pub description: String,
    pub status: QuestionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub user_id: Uuid,
    pub schedule_id: Uuid,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub schedule_id: Option<Uuid>,
    pub status: Option<QuestionStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateQuestionDto {
    pub schedule_id: Uuid,
    #[validate(length(min = 1, max = 2000, message = "description must be 1-2000 characters"))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateQuestionStatusDto {
    pub status: QuestionStatus,
}

/// Query parameters for listing questions.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuestionFilterParams {
    /// Page number (1-indexed, default 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Rows per page (default 10, max 100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub size: Option<i64>,
    /// Only questions raised against this schedule
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub schedule_id: Option<Uuid>,
    /// Only questions in this status
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub status: Option<QuestionStatus>,
}

impl QuestionFilterParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }

    pub fn filter(&self) -> QuestionFilter {
        QuestionFilter {
            schedule_id: self.schedule_id,
            status: self.status,
        }
    }
}

/// Query parameters for the questions-by-date view.
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuestionsByDateParams {
    /// Schedule date (YYYY-MM-DD)
    pub date: NaiveDate,
}
