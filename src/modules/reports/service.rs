//! Report records.
//!
//! The one-in-flight-per-type rule lives in the `uniq_reports_in_flight_type`
//! index; a violation is not translated and surfaces as a server error.

use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;

use study_core::AppError;
use study_models::{CreateReportDto, Report, ReportId, UpdateReportDto};

const REPORT_COLUMNS: &str = r#"id, "type", status, created_at, file"#;

pub struct ReportService;

impl ReportService {
    #[instrument(skip(db))]
    pub async fn create_report(db: &PgPool, dto: CreateReportDto) -> Result<Report, AppError> {
        let report = sqlx::query_as::<_, Report>(&format!(
            r#"INSERT INTO reports ("type", status, file)
               VALUES ($1, $2, $3)
               RETURNING {REPORT_COLUMNS}"#
        ))
        .bind(dto.report_type)
        .bind(dto.status)
        .bind(&dto.file)
        .fetch_one(db)
        .await
        .context("Failed to insert report")?;

        Ok(report)
    }

    /// Newest first.
    #[instrument(skip(db))]
    pub async fn get_reports(db: &PgPool) -> Result<Vec<Report>, AppError> {
        let reports = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(db)
        .await?;

        Ok(reports)
    }

    #[instrument(skip(db))]
    pub async fn get_report(db: &PgPool, id: ReportId) -> Result<Report, AppError> {
        sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Report not found")))
    }

    /// `created_at` is never touched.
    #[instrument(skip(db))]
    pub async fn update_report(
        db: &PgPool,
        id: ReportId,
        dto: UpdateReportDto,
    ) -> Result<Report, AppError> {
        sqlx::query_as::<_, Report>(&format!(
            r#"UPDATE reports
               SET "type" = COALESCE($2, "type"),
                   status = COALESCE($3, status),
                   file = CASE WHEN $4 THEN $5 ELSE file END
               WHERE id = $1
               RETURNING {REPORT_COLUMNS}"#
        ))
        .bind(id)
        .bind(dto.report_type)
        .bind(dto.status)
        .bind(dto.file.is_some())
        .bind(dto.file.flatten())
        .fetch_optional(db)
        .await
        .context("Failed to update report")?
        .ok_or_else(|| AppError::not_found(anyhow!("Report not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_report(db: &PgPool, id: ReportId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Report not found")));
        }

        Ok(())
    }
}
