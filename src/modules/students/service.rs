use std::collections::HashMap;

use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use study_core::AppError;
use study_models::{
    CreateStudentDto, Student, StudentId, StudentRead, StudyGroupId, UpdateStudentDto, UserId,
    UserRead,
};

use crate::modules::study_groups::StudyGroupService;

const STUDENT_COLUMNS: &str = "id, user_id, gender, study_group_id";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            r#"INSERT INTO students (user_id, gender, study_group_id)
               VALUES ($1, $2, $3)
               RETURNING {STUDENT_COLUMNS}"#
        ))
        .bind(dto.user)
        .bind(dto.gender)
        .bind(dto.study_group)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Student"))?;

        Ok(student)
    }

    /// Builds read shapes for the given rows, keeping their order.
    async fn assemble_reads(
        db: &PgPool,
        students: Vec<Student>,
    ) -> Result<Vec<StudentRead>, AppError> {
        if students.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<UserId> = students.iter().map(|s| s.user_id).collect();
        let group_ids: Vec<StudyGroupId> =
            students.iter().filter_map(|s| s.study_group_id).collect();

        let users: HashMap<UserId, UserRead> = sqlx::query_as::<_, UserRead>(
            "SELECT id, first_name, last_name FROM users WHERE id = ANY($1)",
        )
        .bind(&user_ids)
        .fetch_all(db)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

        let groups = StudyGroupService::get_group_reads(db, &group_ids).await?;

        students
            .iter()
            .map(|student| {
                let user = users.get(&student.user_id).cloned().ok_or_else(|| {
                    AppError::internal(anyhow!("User of student {} vanished", student.id))
                })?;
                let group = student
                    .study_group_id
                    .and_then(|id| groups.get(&id).cloned());
                Ok(StudentRead::assemble(student, user, group))
            })
            .collect()
    }

    #[instrument(skip(db))]
    pub async fn get_students(db: &PgPool) -> Result<Vec<StudentRead>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id"
        ))
        .fetch_all(db)
        .await?;

        Self::assemble_reads(db, students).await
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: StudentId) -> Result<StudentRead, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))?;

        Self::assemble_reads(db, vec![student])
            .await?
            .pop()
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_student(
        db: &PgPool,
        id: StudentId,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            r#"UPDATE students
               SET user_id = COALESCE($2, user_id),
                   gender = COALESCE($3, gender),
                   study_group_id = CASE WHEN $4 THEN $5 ELSE study_group_id END
               WHERE id = $1
               RETURNING {STUDENT_COLUMNS}"#
        ))
        .bind(id)
        .bind(dto.user)
        .bind(dto.gender)
        .bind(dto.study_group.is_some())
        .bind(dto.study_group.flatten())
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::from_write(e, "Student"))?
        .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: StudentId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        Ok(())
    }
}
