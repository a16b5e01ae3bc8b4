use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use instructor_core::{Deleted, ErrorResponse, Paging, Status};
use instructor_models::Role;
use instructor_models::attendance::{Attendance, CreateAttendanceDto};
use instructor_models::auth::{LoginRequest, LoginResponse};
use instructor_models::questions::{
    CreateQuestionDto, Question, QuestionStatus, UpdateQuestionStatusDto,
};
use instructor_models::schedules::{
    CreateScheduleDto, Schedule, ScheduleWithQuestions, UpdateDocumentationDto,
};
use instructor_models::users::{CreateUserDto, UpdateUserDto, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::get_user_by_email,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::schedules::controller::create_schedule,
        crate::modules::schedules::controller::get_schedules,
        crate::modules::schedules::controller::get_schedule,
        crate::modules::schedules::controller::update_documentation,
        crate::modules::schedules::controller::delete_schedule,
        crate::modules::questions::controller::create_question,
        crate::modules::questions::controller::get_questions_by_date,
        crate::modules::questions::controller::get_questions,
        crate::modules::questions::controller::get_question,
        crate::modules::questions::controller::update_question_status,
        crate::modules::questions::controller::delete_question,
        crate::modules::attendance::controller::create_attendance,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::get_attendance_by_id,
        crate::modules::attendance::controller::delete_attendance,
    ),
    components(
        schemas(
            Status,
            Paging,
            Deleted,
            ErrorResponse,
            Role,
            LoginRequest,
            LoginResponse,
            User,
            CreateUserDto,
            UpdateUserDto,
            Schedule,
            ScheduleWithQuestions,
            CreateScheduleDto,
            UpdateDocumentationDto,
            Question,
            QuestionStatus,
            CreateQuestionDto,
            UpdateQuestionStatusDto,
            Attendance,
            CreateAttendanceDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Users", description = "User management endpoints"),
        (name = "Schedules", description = "Training session schedules"),
        (name = "Questions", description = "Questions raised during sessions"),
        (name = "Attendance", description = "Session check-ins")
    ),
    info(
        title = "Instructor-Led API",
        version = "0.1.0",
        description = "Scheduling, questions and attendance for instructor-led training, with role-based access control.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
