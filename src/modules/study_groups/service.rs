use std::collections::HashMap;

use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use study_core::AppError;
use study_models::{
    CourseId, CreateStudyGroupPayload, StudyGroup, StudyGroupId, StudyGroupRead,
    UpdateStudyGroupDto,
};

use crate::modules::courses::CourseService;

pub const COURSE_DOES_NOT_EXIST: &str = "Course does not exist";

pub struct StudyGroupService;

impl StudyGroupService {
    /// Creates a group under the referenced course, or fails with
    /// `Course does not exist` without writing anything.
    #[instrument(skip(db))]
    pub async fn create_study_group(
        db: &PgPool,
        payload: &CreateStudyGroupPayload,
    ) -> Result<StudyGroup, AppError> {
        let mut tx = db.begin().await?;

        let course_id =
            sqlx::query_scalar::<_, CourseId>("SELECT id FROM courses WHERE id = $1 FOR SHARE")
                .bind(payload.course.id())
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::message(COURSE_DOES_NOT_EXIST))?;

        let group = sqlx::query_as::<_, StudyGroup>(
            "INSERT INTO study_groups (name, course_id) VALUES ($1, $2) RETURNING id, name, course_id",
        )
        .bind(&payload.name)
        .bind(course_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(group)
    }

    /// Builds read shapes for the given rows, keeping their order.
    pub async fn assemble_reads(
        db: &PgPool,
        groups: Vec<StudyGroup>,
    ) -> Result<Vec<StudyGroupRead>, AppError> {
        let course_ids: Vec<CourseId> = groups.iter().map(|g| g.course_id).collect();
        let courses = CourseService::get_course_reads(db, &course_ids).await?;

        groups
            .into_iter()
            .map(|group| {
                let course = courses.get(&group.course_id).cloned().ok_or_else(|| {
                    AppError::internal(anyhow!("Course {} of group {} vanished", group.course_id, group.id))
                })?;
                Ok(StudyGroupRead::assemble(group, course))
            })
            .collect()
    }

    /// Read shapes for a batch of groups, keyed by id.
    pub async fn get_group_reads(
        db: &PgPool,
        ids: &[StudyGroupId],
    ) -> Result<HashMap<StudyGroupId, StudyGroupRead>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let groups = sqlx::query_as::<_, StudyGroup>(
            "SELECT id, name, course_id FROM study_groups WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(db)
        .await?;

        let group_ids: Vec<StudyGroupId> = groups.iter().map(|g| g.id).collect();
        let reads = Self::assemble_reads(db, groups).await?;

        Ok(group_ids.into_iter().zip(reads).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_study_groups(db: &PgPool) -> Result<Vec<StudyGroupRead>, AppError> {
        let groups = sqlx::query_as::<_, StudyGroup>(
            "SELECT id, name, course_id FROM study_groups ORDER BY id",
        )
        .fetch_all(db)
        .await?;

        Self::assemble_reads(db, groups).await
    }

    async fn find(db: &PgPool, id: StudyGroupId) -> Result<StudyGroup, AppError> {
        sqlx::query_as::<_, StudyGroup>(
            "SELECT id, name, course_id FROM study_groups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Study group not found")))
    }

    async fn read_one(db: &PgPool, group: StudyGroup) -> Result<StudyGroupRead, AppError> {
        Self::assemble_reads(db, vec![group])
            .await?
            .pop()
            .ok_or_else(|| AppError::not_found(anyhow!("Study group not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_study_group(db: &PgPool, id: StudyGroupId) -> Result<StudyGroupRead, AppError> {
        let group = Self::find(db, id).await?;
        Self::read_one(db, group).await
    }

    #[instrument(skip(db))]
    pub async fn update_study_group(
        db: &PgPool,
        id: StudyGroupId,
        dto: UpdateStudyGroupDto,
    ) -> Result<StudyGroupRead, AppError> {
        let group = sqlx::query_as::<_, StudyGroup>(
            r#"UPDATE study_groups
               SET name = COALESCE($2, name), course_id = COALESCE($3, course_id)
               WHERE id = $1
               RETURNING id, name, course_id"#,
        )
        .bind(id)
        .bind(dto.name)
        .bind(dto.course.map(|course| course.id()))
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::from_write(e, "Study group"))?
        .ok_or_else(|| AppError::not_found(anyhow!("Study group not found")))?;

        Self::read_one(db, group).await
    }

    /// Deletes the group; its students stay without a group.
    #[instrument(skip(db))]
    pub async fn delete_study_group(db: &PgPool, id: StudyGroupId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM study_groups WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Study group not found")));
        }

        Ok(())
    }
}
