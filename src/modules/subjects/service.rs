use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use study_core::AppError;
use study_models::{CreateSubjectDto, Subject, SubjectId, UpdateSubjectDto};

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db))]
    pub async fn create_subject(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        let subject = sqlx::query_as::<_, Subject>(
            "INSERT INTO subjects (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Subject"))?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn get_subjects(db: &PgPool) -> Result<Vec<Subject>, AppError> {
        let subjects =
            sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects ORDER BY name, id")
                .fetch_all(db)
                .await?;

        Ok(subjects)
    }

    #[instrument(skip(db))]
    pub async fn get_subject(db: &PgPool, id: SubjectId) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Subject not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_subject(
        db: &PgPool,
        id: SubjectId,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(
            r#"UPDATE subjects SET name = COALESCE($2, name)
               WHERE id = $1
               RETURNING id, name"#,
        )
        .bind(id)
        .bind(dto.name)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::from_write(e, "Subject"))?
        .ok_or_else(|| AppError::not_found(anyhow!("Subject not found")))
    }

    /// Deletes the subject and detaches it from every course.
    #[instrument(skip(db))]
    pub async fn delete_subject(db: &PgPool, id: SubjectId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Subject not found")));
        }

        Ok(())
    }
}
