use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use study_core::{AppError, ErrorResponse};
use study_models::{CreateTutorDto, TutorId, TutorRead, TutorWrite, UpdateTutorDto};

use crate::modules::tutors::service::TutorService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/tutors",
    request_body = CreateTutorDto,
    responses(
        (status = 201, description = "Tutor created", body = TutorWrite),
        (status = 400, description = "Unknown user or user is already a tutor", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Tutors"
)]
#[instrument(skip(state))]
pub async fn create_tutor(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTutorDto>,
) -> Result<(StatusCode, Json<TutorWrite>), AppError> {
    let tutor = TutorService::create_tutor(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(TutorWrite::from(&tutor))))
}

#[utoipa::path(
    get,
    path = "/api/v1/tutors",
    responses((status = 200, description = "All tutors", body = Vec<TutorRead>)),
    tag = "Tutors"
)]
#[instrument(skip(state))]
pub async fn get_tutors(State(state): State<AppState>) -> Result<Json<Vec<TutorRead>>, AppError> {
    Ok(Json(TutorService::get_tutors(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/tutors/{id}",
    params(("id" = i64, Path, description = "Tutor ID")),
    responses(
        (status = 200, description = "Tutor details", body = TutorRead),
        (status = 404, description = "Tutor not found", body = ErrorResponse)
    ),
    tag = "Tutors"
)]
#[instrument(skip(state))]
pub async fn get_tutor(
    State(state): State<AppState>,
    Path(id): Path<TutorId>,
) -> Result<Json<TutorRead>, AppError> {
    Ok(Json(TutorService::get_tutor(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/tutors/{id}",
    params(("id" = i64, Path, description = "Tutor ID")),
    request_body = UpdateTutorDto,
    responses(
        (status = 200, description = "Tutor updated", body = TutorWrite),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Tutor not found", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Tutors"
)]
#[instrument(skip(state))]
pub async fn update_tutor(
    State(state): State<AppState>,
    Path(id): Path<TutorId>,
    ValidatedJson(dto): ValidatedJson<UpdateTutorDto>,
) -> Result<Json<TutorWrite>, AppError> {
    let tutor = TutorService::update_tutor(&state.db, id, dto).await?;
    Ok(Json(TutorWrite::from(&tutor)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tutors/{id}",
    params(("id" = i64, Path, description = "Tutor ID")),
    responses(
        (status = 204, description = "Tutor deleted"),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Tutor not found", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Tutors"
)]
#[instrument(skip(state))]
pub async fn delete_tutor(
    State(state): State<AppState>,
    Path(id): Path<TutorId>,
) -> Result<StatusCode, AppError> {
    TutorService::delete_tutor(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
