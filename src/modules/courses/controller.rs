use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use tracing::instrument;

use study_core::{AppError, ErrorResponse};
use study_models::{CourseId, CourseRead, CreateCoursePayload, UpdateCourseDto};
use study_observability::track_course_created;

use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::{EchoJson, ValidatedJson};

/// Create a course with its tutor and subjects.
///
/// The tutor is named by its user; subjects by id. On success the request
/// body is returned unchanged.
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CreateCoursePayload,
    responses(
        (status = 201, description = "Course created; echoes the request body", body = serde_json::Value),
        (status = 400, description = "Tutor does not exist / Subject does not exist", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, body))]
pub async fn create_course(
    State(state): State<AppState>,
    body: EchoJson<CreateCoursePayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let course = CourseService::create_course(&state.db, &body.payload).await?;
    tracing::info!(course_id = %course.id, "Course created");
    track_course_created();

    Ok((StatusCode::CREATED, Json(body.raw)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses((status = 200, description = "All courses", body = Vec<CourseRead>)),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(State(state): State<AppState>) -> Result<Json<Vec<CourseRead>>, AppError> {
    Ok(Json(CourseService::get_courses(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = CourseRead),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<Json<CourseRead>, AppError> {
    Ok(Json(CourseService::get_course(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = CourseRead),
        (status = 400, description = "Tutor does not exist / Subject does not exist", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<CourseRead>, AppError> {
    Ok(Json(CourseService::update_course(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course and its study groups deleted"),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<StatusCode, AppError> {
    CourseService::delete_course(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
