use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use tracing::instrument;

use study_core::{AppError, ErrorResponse};
use study_models::{CreateStudyGroupPayload, StudyGroupId, StudyGroupRead, UpdateStudyGroupDto};
use study_observability::track_study_group_created;

use crate::modules::study_groups::service::StudyGroupService;
use crate::state::AppState;
use crate::validator::{EchoJson, ValidatedJson};

/// Create a study group under an existing course. On success the request
/// body is returned unchanged.
#[utoipa::path(
    post,
    path = "/api/v1/study_groups",
    request_body = CreateStudyGroupPayload,
    responses(
        (status = 201, description = "Study group created; echoes the request body", body = serde_json::Value),
        (status = 400, description = "Course does not exist", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Study groups"
)]
#[instrument(skip(state, body))]
pub async fn create_study_group(
    State(state): State<AppState>,
    body: EchoJson<CreateStudyGroupPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let group = StudyGroupService::create_study_group(&state.db, &body.payload).await?;
    tracing::info!(study_group_id = %group.id, course_id = %group.course_id, "Study group created");
    track_study_group_created();

    Ok((StatusCode::CREATED, Json(body.raw)))
}

#[utoipa::path(
    get,
    path = "/api/v1/study_groups",
    responses((status = 200, description = "All study groups", body = Vec<StudyGroupRead>)),
    tag = "Study groups"
)]
#[instrument(skip(state))]
pub async fn get_study_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudyGroupRead>>, AppError> {
    Ok(Json(StudyGroupService::get_study_groups(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/study_groups/{id}",
    params(("id" = i64, Path, description = "Study group ID")),
    responses(
        (status = 200, description = "Study group details", body = StudyGroupRead),
        (status = 404, description = "Study group not found", body = ErrorResponse)
    ),
    tag = "Study groups"
)]
#[instrument(skip(state))]
pub async fn get_study_group(
    State(state): State<AppState>,
    Path(id): Path<StudyGroupId>,
) -> Result<Json<StudyGroupRead>, AppError> {
    Ok(Json(StudyGroupService::get_study_group(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/study_groups/{id}",
    params(("id" = i64, Path, description = "Study group ID")),
    request_body = UpdateStudyGroupDto,
    responses(
        (status = 200, description = "Study group updated", body = StudyGroupRead),
        (status = 400, description = "Invalid input or unknown course", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Study group not found", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Study groups"
)]
#[instrument(skip(state))]
pub async fn update_study_group(
    State(state): State<AppState>,
    Path(id): Path<StudyGroupId>,
    ValidatedJson(dto): ValidatedJson<UpdateStudyGroupDto>,
) -> Result<Json<StudyGroupRead>, AppError> {
    Ok(Json(
        StudyGroupService::update_study_group(&state.db, id, dto).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/study_groups/{id}",
    params(("id" = i64, Path, description = "Study group ID")),
    responses(
        (status = 204, description = "Study group deleted"),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Study group not found", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Study groups"
)]
#[instrument(skip(state))]
pub async fn delete_study_group(
    State(state): State<AppState>,
    Path(id): Path<StudyGroupId>,
) -> Result<StatusCode, AppError> {
    StudyGroupService::delete_study_group(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
