//! Generated report records.
//!
//! At most one report per type may be in flight (`created` or `processing`).
//! The store enforces this with a partial unique index; a violating insert
//! surfaces as a database error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::ReportId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "report_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    CourseReport,
    GroupsReport,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::CourseReport => "course_report",
            ReportType::GroupsReport => "groups_report",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Created,
    Processing,
    Failed,
    Completed,
}

/// Report row and read shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Report {
    pub id: ReportId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub status: ReportStatus,
    #[serde(with = "study_core::serde::wire_datetime")]
    #[schema(value_type = String, example = "2024-05-01T12:30:00")]
    pub created_at: DateTime<Utc>,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    #[serde(rename = "type")]
    pub report_type: ReportType,
    #[serde(default)]
    pub status: ReportStatus,
    #[validate(length(max = 255))]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReportDto {
    #[serde(rename = "type")]
    pub report_type: Option<ReportType>,
    pub status: Option<ReportStatus>,
    #[serde(default, deserialize_with = "study_core::serde::double_option")]
    #[validate(length(max = 255))]
    #[schema(value_type = Option<String>)]
    pub file: Option<Option<String>>,
}
