//! Courses and their tutor/subject associations.
//!
//! Creating or updating a course resolves the referenced tutor (through its
//! owning user) and subjects inside the same transaction as the writes, so a
//! bad reference leaves nothing behind.

use std::collections::{HashMap, HashSet};

use anyhow::anyhow;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use study_core::AppError;
use study_models::{
    Course, CourseId, CourseRead, CourseSubject, CreateCoursePayload, Ref, Subject, SubjectId,
    TutorId, TutorRef, UpdateCourseDto,
};

use crate::modules::tutors::TutorService;

pub const TUTOR_DOES_NOT_EXIST: &str = "Tutor does not exist";
pub const SUBJECT_DOES_NOT_EXIST: &str = "Subject does not exist";

pub struct CourseService;

impl CourseService {
    /// Finds the tutor owned by the referenced user.
    async fn resolve_tutor(conn: &mut PgConnection, tutor: &TutorRef) -> Result<TutorId, AppError> {
        sqlx::query_scalar::<_, TutorId>("SELECT id FROM tutors WHERE user_id = $1")
            .bind(tutor.user.id())
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::message(TUTOR_DOES_NOT_EXIST))
    }

    /// Checks that every referenced subject exists and returns the ids in
    /// request order without duplicates.
    async fn resolve_subjects(
        conn: &mut PgConnection,
        subjects: &[Ref<SubjectId>],
    ) -> Result<Vec<SubjectId>, AppError> {
        let mut seen = HashSet::new();
        let ids: Vec<SubjectId> = subjects
            .iter()
            .map(Ref::id)
            .filter(|id| seen.insert(*id))
            .collect();

        if ids.is_empty() {
            return Ok(ids);
        }

        let found: HashSet<SubjectId> =
            sqlx::query_scalar::<_, SubjectId>("SELECT id FROM subjects WHERE id = ANY($1)")
                .bind(&ids)
                .fetch_all(conn)
                .await?
                .into_iter()
                .collect();

        if ids.iter().any(|id| !found.contains(id)) {
            return Err(AppError::message(SUBJECT_DOES_NOT_EXIST));
        }

        Ok(ids)
    }

    async fn attach_subjects(
        conn: &mut PgConnection,
        course_id: CourseId,
        subject_ids: &[SubjectId],
    ) -> Result<(), AppError> {
        for subject_id in subject_ids {
            sqlx::query(
                r#"INSERT INTO course_subjects (course_id, subject_id)
                   VALUES ($1, $2)
                   ON CONFLICT (course_id, subject_id) DO NOTHING"#,
            )
            .bind(course_id)
            .bind(subject_id)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// Creates a course from a nested payload.
    ///
    /// Fails with `Tutor does not exist` or `Subject does not exist` before
    /// anything is written.
    #[instrument(skip(db))]
    pub async fn create_course(
        db: &PgPool,
        payload: &CreateCoursePayload,
    ) -> Result<Course, AppError> {
        let mut tx = db.begin().await?;

        let tutor_id = match &payload.tutor {
            Some(tutor) => Some(Self::resolve_tutor(&mut tx, tutor).await?),
            None => None,
        };
        let subject_ids = Self::resolve_subjects(&mut tx, &payload.subjects).await?;

        let course = sqlx::query_as::<_, Course>(
            "INSERT INTO courses (name, tutor_id) VALUES ($1, $2) RETURNING id, name, tutor_id",
        )
        .bind(&payload.name)
        .bind(tutor_id)
        .fetch_one(&mut *tx)
        .await?;

        Self::attach_subjects(&mut tx, course.id, &subject_ids).await?;

        tx.commit().await?;

        Ok(course)
    }

    /// Builds read shapes for the given rows, keeping their order.
    pub async fn assemble_reads(
        db: &PgPool,
        courses: Vec<Course>,
    ) -> Result<Vec<CourseRead>, AppError> {
        if courses.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: Vec<CourseId> = courses.iter().map(|c| c.id).collect();
        let tutor_ids: Vec<TutorId> = courses.iter().filter_map(|c| c.tutor_id).collect();

        let tutors = TutorService::get_tutor_reads(db, &tutor_ids).await?;

        let rows = sqlx::query_as::<_, CourseSubject>(
            r#"SELECT cs.course_id, s.id, s.name
               FROM course_subjects cs
               JOIN subjects s ON s.id = cs.subject_id
               WHERE cs.course_id = ANY($1)
               ORDER BY cs.id"#,
        )
        .bind(&course_ids)
        .fetch_all(db)
        .await?;

        let mut subjects: HashMap<CourseId, Vec<Subject>> = HashMap::new();
        for row in rows {
            subjects.entry(row.course_id).or_default().push(row.into());
        }

        Ok(courses
            .into_iter()
            .map(|course| {
                let tutor = course.tutor_id.and_then(|id| tutors.get(&id).cloned());
                let course_subjects = subjects.remove(&course.id).unwrap_or_default();
                CourseRead::assemble(course, tutor, course_subjects)
            })
            .collect())
    }

    /// Read shapes for a batch of courses, keyed by id.
    pub async fn get_course_reads(
        db: &PgPool,
        ids: &[CourseId],
    ) -> Result<HashMap<CourseId, CourseRead>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let courses = sqlx::query_as::<_, Course>(
            "SELECT id, name, tutor_id FROM courses WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(db)
        .await?;

        Ok(Self::assemble_reads(db, courses)
            .await?
            .into_iter()
            .map(|read| (read.id, read))
            .collect())
    }

    #[instrument(skip(db))]
    pub async fn get_courses(db: &PgPool) -> Result<Vec<CourseRead>, AppError> {
        let courses =
            sqlx::query_as::<_, Course>("SELECT id, name, tutor_id FROM courses ORDER BY name, id")
                .fetch_all(db)
                .await?;

        Self::assemble_reads(db, courses).await
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, id: CourseId) -> Result<CourseRead, AppError> {
        let course =
            sqlx::query_as::<_, Course>("SELECT id, name, tutor_id FROM courses WHERE id = $1")
                .bind(id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))?;

        Self::assemble_reads(db, vec![course])
            .await?
            .pop()
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }

    /// Partially updates a course. `subjects`, when present, replaces the
    /// whole association set.
    #[instrument(skip(db))]
    pub async fn update_course(
        db: &PgPool,
        id: CourseId,
        dto: UpdateCourseDto,
    ) -> Result<CourseRead, AppError> {
        let mut tx = db.begin().await?;

        let existing = sqlx::query_as::<_, Course>(
            "SELECT id, name, tutor_id FROM courses WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))?;

        let tutor_id = match &dto.tutor {
            None => existing.tutor_id,
            Some(None) => None,
            Some(Some(tutor)) => Some(Self::resolve_tutor(&mut tx, tutor).await?),
        };
        let subject_ids = match &dto.subjects {
            Some(subjects) => Some(Self::resolve_subjects(&mut tx, subjects).await?),
            None => None,
        };

        let course = sqlx::query_as::<_, Course>(
            r#"UPDATE courses SET name = $2, tutor_id = $3
               WHERE id = $1
               RETURNING id, name, tutor_id"#,
        )
        .bind(id)
        .bind(dto.name.unwrap_or(existing.name))
        .bind(tutor_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(subject_ids) = subject_ids {
            sqlx::query("DELETE FROM course_subjects WHERE course_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::attach_subjects(&mut tx, id, &subject_ids).await?;
        }

        tx.commit().await?;

        Self::assemble_reads(db, vec![course])
            .await?
            .pop()
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }

    /// Deletes the course together with its study groups.
    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: CourseId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }

        Ok(())
    }
}
