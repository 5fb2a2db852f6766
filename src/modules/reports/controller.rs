use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use study_core::{AppError, ErrorResponse};
use study_models::{CreateReportDto, Report, ReportId, UpdateReportDto};
use study_observability::track_report_created;

use crate::modules::reports::service::ReportService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a report. Only one report per type may be created or
/// processing at a time.
#[utoipa::path(
    post,
    path = "/api/v1/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created", body = Report),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "A report of this type is already in flight", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn create_report(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateReportDto>,
) -> Result<(StatusCode, Json<Report>), AppError> {
    let report = ReportService::create_report(&state.db, dto).await?;
    track_report_created(report.report_type.as_str());

    Ok((StatusCode::CREATED, Json(report)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports",
    responses((status = 200, description = "All reports, newest first", body = Vec<Report>)),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn get_reports(State(state): State<AppState>) -> Result<Json<Vec<Report>>, AppError> {
    Ok(Json(ReportService::get_reports(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}",
    params(("id" = i64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report details", body = Report),
        (status = 404, description = "Report not found", body = ErrorResponse)
    ),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<ReportId>,
) -> Result<Json<Report>, AppError> {
    Ok(Json(ReportService::get_report(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/reports/{id}",
    params(("id" = i64, Path, description = "Report ID")),
    request_body = UpdateReportDto,
    responses(
        (status = 200, description = "Report updated", body = Report),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Report not found", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<ReportId>,
    ValidatedJson(dto): ValidatedJson<UpdateReportDto>,
) -> Result<Json<Report>, AppError> {
    Ok(Json(ReportService::update_report(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reports/{id}",
    params(("id" = i64, Path, description = "Report ID")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Report not found", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<ReportId>,
) -> Result<StatusCode, AppError> {
    ReportService::delete_report(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
