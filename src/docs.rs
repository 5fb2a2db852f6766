use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use study_core::ErrorResponse;
use study_models::{
    CourseRead, CreateCoursePayload, CreateReportDto, CreateStudentDto, CreateStudyGroupPayload,
    CreateSubjectDto, CreateTutorDto, CreateUserDto, Gender, Report, ReportStatus, ReportType,
    Role, StudentRead, StudentWrite, StudyGroupRead, Subject, TutorRead, TutorWrite,
    UpdateCourseDto, UpdateReportDto, UpdateStudentDto, UpdateStudyGroupDto, UpdateSubjectDto,
    UpdateTutorDto, UpdateUserDto, UserRead,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::tutors::controller::create_tutor,
        crate::modules::tutors::controller::get_tutors,
        crate::modules::tutors::controller::get_tutor,
        crate::modules::tutors::controller::update_tutor,
        crate::modules::tutors::controller::delete_tutor,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::study_groups::controller::create_study_group,
        crate::modules::study_groups::controller::get_study_groups,
        crate::modules::study_groups::controller::get_study_group,
        crate::modules::study_groups::controller::update_study_group,
        crate::modules::study_groups::controller::delete_study_group,
        crate::modules::reports::controller::create_report,
        crate::modules::reports::controller::get_reports,
        crate::modules::reports::controller::get_report,
        crate::modules::reports::controller::update_report,
        crate::modules::reports::controller::delete_report,
    ),
    components(
        schemas(
            ErrorResponse,
            Role,
            UserRead,
            CreateUserDto,
            UpdateUserDto,
            TutorRead,
            TutorWrite,
            CreateTutorDto,
            UpdateTutorDto,
            Gender,
            StudentRead,
            StudentWrite,
            CreateStudentDto,
            UpdateStudentDto,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            CourseRead,
            CreateCoursePayload,
            UpdateCourseDto,
            StudyGroupRead,
            CreateStudyGroupPayload,
            UpdateStudyGroupDto,
            ReportType,
            ReportStatus,
            Report,
            CreateReportDto,
            UpdateReportDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "User accounts"),
        (name = "Tutors", description = "Tutors; mutations require the admin role"),
        (name = "Students", description = "Students; mutations require the tutor role"),
        (name = "Subjects", description = "Subjects; mutations require the admin role"),
        (name = "Courses", description = "Courses; mutations require the admin role"),
        (name = "Study groups", description = "Study groups; mutations require the admin role"),
        (name = "Reports", description = "Generated reports; mutations require the admin role")
    ),
    info(
        title = "Study API",
        version = "0.1.0",
        description = "Administration backend for users, tutors, students, study groups, courses, subjects and reports.",
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
                "token_auth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "Token <key>",
                ))),
            )
        }
    }
}
