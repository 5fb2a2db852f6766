use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::courses::CourseRead;
use crate::ids::{CourseId, Ref, StudyGroupId};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StudyGroup {
    pub id: StudyGroupId,
    pub name: String,
    pub course_id: CourseId,
}

/// Read shape: `{name, course}` with the course fully embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudyGroupRead {
    pub name: String,
    pub course: CourseRead,
}

impl StudyGroupRead {
    pub fn assemble(group: StudyGroup, course: CourseRead) -> Self {
        Self {
            name: group.name,
            course,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudyGroupPayload {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Course id, bare or as `{"id": ...}`
    #[schema(value_type = i64)]
    pub course: Ref<CourseId>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudyGroupDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub course: Option<Ref<CourseId>>,
}
