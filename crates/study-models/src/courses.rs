//! Course models.
//!
//! A course has an optional tutor and an ordered set of subjects. Its read
//! shape nests the tutor (which nests the user) and the subjects.
//!
//! The create payload names the tutor through its owning user, mirroring the
//! read shape, so a client can post back what it read:
//!
//! ```json
//! {"name": "Psychology", "tutor": {"user": {"id": 4}}, "subjects": [{"id": 1}, 2]}
//! ```

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, Ref, SubjectId, TutorId, UserId};
use crate::subjects::Subject;
use crate::tutors::TutorRead;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub tutor_id: Option<TutorId>,
}

/// Read shape: `{id, name, tutor, subjects}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CourseRead {
    pub id: CourseId,
    pub name: String,
    pub tutor: Option<TutorRead>,
    pub subjects: Vec<Subject>,
}

impl CourseRead {
    pub fn assemble(course: Course, tutor: Option<TutorRead>, subjects: Vec<Subject>) -> Self {
        Self {
            id: course.id,
            name: course.name,
            tutor,
            subjects,
        }
    }
}

/// A subject attached to a course, tagged with the course it was loaded for.
#[derive(Debug, Clone, FromRow)]
pub struct CourseSubject {
    pub course_id: CourseId,
    pub id: SubjectId,
    pub name: String,
}

impl From<CourseSubject> for Subject {
    fn from(row: CourseSubject) -> Self {
        Subject {
            id: row.id,
            name: row.name,
        }
    }
}

/// Names a tutor by its owning user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TutorRef {
    pub user: Ref<UserId>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCoursePayload {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// `{"user": <user id>}` or `{"user": {"id": <user id>}}`
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub tutor: Option<TutorRef>,
    /// Subject ids, bare or as `{"id": ...}` objects
    #[serde(default)]
    #[schema(value_type = Vec<i64>)]
    pub subjects: Vec<Ref<SubjectId>>,
}

/// Partial course update. `tutor: null` detaches the tutor; `subjects`
/// replaces the whole association set.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "study_core::serde::double_option")]
    #[schema(value_type = Option<Object>)]
    pub tutor: Option<Option<TutorRef>>,
    #[schema(value_type = Option<Vec<i64>>)]
    pub subjects: Option<Vec<Ref<SubjectId>>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutors::TutorWithUser;
    use serde_json::json;

    #[test]
    fn test_read_shape_nests_tutor_and_subjects_in_order() {
        let tutor = TutorRead::from(TutorWithUser {
            id: TutorId(1),
            user_id: UserId(5),
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
        });
        let read = CourseRead::assemble(
            Course {
                id: CourseId(10),
                name: "Психология".to_string(),
                tutor_id: Some(TutorId(1)),
            },
            Some(tutor),
            vec![
                Subject {
                    id: SubjectId(2),
                    name: "Статистика".to_string(),
                },
                Subject {
                    id: SubjectId(1),
                    name: "Социология".to_string(),
                },
            ],
        );

        assert_eq!(
            serde_json::to_value(&read).unwrap(),
            json!({
                "id": 10,
                "name": "Психология",
                "tutor": {"user": {"id": 5, "first_name": "Ivan", "last_name": "Petrov"}},
                "subjects": [
                    {"id": 2, "name": "Статистика"},
                    {"id": 1, "name": "Социология"}
                ]
            })
        );
    }

    #[test]
    fn test_read_shape_without_tutor() {
        let read = CourseRead::assemble(
            Course {
                id: CourseId(1),
                name: "History".to_string(),
                tutor_id: None,
            },
            None,
            vec![],
        );
        let value = serde_json::to_value(&read).unwrap();
        assert_eq!(value["tutor"], serde_json::Value::Null);
        assert_eq!(value["subjects"], json!([]));

        let parsed: CourseRead = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, read);
    }

    #[test]
    fn test_payload_accepts_read_shape_copy() {
        let payload: CreateCoursePayload = serde_json::from_value(json!({
            "name": "Психология",
            "tutor": {"user": {"id": 5, "first_name": "Ivan", "last_name": "Petrov"}},
            "subjects": [{"id": 1, "name": "Социология"}, 2]
        }))
        .unwrap();

        assert_eq!(payload.tutor.unwrap().user.id(), UserId(5));
        let ids: Vec<SubjectId> = payload.subjects.iter().map(Ref::id).collect();
        assert_eq!(ids, vec![SubjectId(1), SubjectId(2)]);
    }

    #[test]
    fn test_payload_tutor_and_subjects_default() {
        let payload: CreateCoursePayload =
            serde_json::from_value(json!({"name": "History"})).unwrap();
        assert!(payload.tutor.is_none());
        assert!(payload.subjects.is_empty());
    }

    #[test]
    fn test_update_distinguishes_detach_from_absent() {
        let detach: UpdateCourseDto = serde_json::from_value(json!({"tutor": null})).unwrap();
        assert_eq!(detach.tutor, Some(None));

        let untouched: UpdateCourseDto = serde_json::from_value(json!({"name": "X"})).unwrap();
        assert_eq!(untouched.tutor, None);
        assert!(untouched.subjects.is_none());
    }
}
