//! Student models.
//!
//! Like tutors, students have a nested read shape and a flat write shape
//! that references the user and study group by id.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{StudentId, StudyGroupId, UserId};
use crate::study_groups::StudyGroupRead;
use crate::users::UserRead;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[sqlx(type_name = "gender", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct Student {
    pub id: StudentId,
    pub user_id: UserId,
    pub gender: Gender,
    pub study_group_id: Option<StudyGroupId>,
}

/// Read shape: `{user, gender, study_group}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentRead {
    pub user: UserRead,
    pub gender: Gender,
    pub study_group: Option<StudyGroupRead>,
}

impl StudentRead {
    pub fn assemble(student: &Student, user: UserRead, study_group: Option<StudyGroupRead>) -> Self {
        Self {
            user,
            gender: student.gender,
            study_group,
        }
    }
}

/// Write shape: `{user: <user id>, gender, study_group: <group id> | null}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentWrite {
    pub user: UserId,
    pub gender: Gender,
    pub study_group: Option<StudyGroupId>,
}

impl From<&Student> for StudentWrite {
    fn from(student: &Student) -> Self {
        Self {
            user: student.user_id,
            gender: student.gender,
            study_group: student.study_group_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    pub user: UserId,
    #[serde(default)]
    pub gender: Gender,
    pub study_group: Option<StudyGroupId>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    pub user: Option<UserId>,
    pub gender: Option<Gender>,
    /// `null` removes the student from its group
    #[serde(default, deserialize_with = "study_core::serde::double_option")]
    #[schema(value_type = Option<i64>)]
    pub study_group: Option<Option<StudyGroupId>>,
}
