use std::collections::HashMap;

use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use study_core::AppError;
use study_models::{CreateTutorDto, Tutor, TutorId, TutorRead, TutorWithUser, UpdateTutorDto};

const TUTOR_WITH_USER: &str = r#"SELECT t.id, t.user_id, u.first_name, u.last_name
    FROM tutors t
    JOIN users u ON u.id = t.user_id"#;

pub struct TutorService;

impl TutorService {
    #[instrument(skip(db))]
    pub async fn create_tutor(db: &PgPool, dto: CreateTutorDto) -> Result<Tutor, AppError> {
        let tutor = sqlx::query_as::<_, Tutor>(
            "INSERT INTO tutors (user_id) VALUES ($1) RETURNING id, user_id",
        )
        .bind(dto.user)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Tutor"))?;

        Ok(tutor)
    }

    #[instrument(skip(db))]
    pub async fn get_tutors(db: &PgPool) -> Result<Vec<TutorRead>, AppError> {
        let rows = sqlx::query_as::<_, TutorWithUser>(&format!("{TUTOR_WITH_USER} ORDER BY t.id"))
            .fetch_all(db)
            .await?;

        Ok(rows.into_iter().map(TutorRead::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_tutor(db: &PgPool, id: TutorId) -> Result<TutorRead, AppError> {
        let row = sqlx::query_as::<_, TutorWithUser>(&format!("{TUTOR_WITH_USER} WHERE t.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Tutor not found")))?;

        Ok(TutorRead::from(row))
    }

    /// Read shapes for a batch of tutors, keyed by id.
    pub async fn get_tutor_reads(
        db: &PgPool,
        ids: &[TutorId],
    ) -> Result<HashMap<TutorId, TutorRead>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows =
            sqlx::query_as::<_, TutorWithUser>(&format!("{TUTOR_WITH_USER} WHERE t.id = ANY($1)"))
                .bind(ids)
                .fetch_all(db)
                .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.id, TutorRead::from(row)))
            .collect())
    }

    #[instrument(skip(db))]
    pub async fn update_tutor(
        db: &PgPool,
        id: TutorId,
        dto: UpdateTutorDto,
    ) -> Result<Tutor, AppError> {
        let tutor = sqlx::query_as::<_, Tutor>(
            r#"UPDATE tutors SET user_id = COALESCE($2, user_id)
               WHERE id = $1
               RETURNING id, user_id"#,
        )
        .bind(id)
        .bind(dto.user)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::from_write(e, "Tutor"))?
        .ok_or_else(|| AppError::not_found(anyhow!("Tutor not found")))?;

        Ok(tutor)
    }

    /// Deletes the tutor; courses it taught keep existing without a tutor.
    #[instrument(skip(db))]
    pub async fn delete_tutor(db: &PgPool, id: TutorId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tutors WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Tutor not found")));
        }

        Ok(())
    }
}
