//! # Study Models
//!
//! Domain models, read/write shapes and DTOs for the Study API.
//!
//! Every entity has a row type loaded with `sqlx::FromRow` and a read shape
//! that nests related entities. Tutors and students additionally have a flat
//! write shape that references related entities by id.
//!
//! # Modules
//!
//! - [`ids`]: typed surrogate keys and the [`Ref`] payload reference
//! - [`users`]: users, roles and credentials
//! - [`tutors`], [`students`]: user wrappers with read and write shapes
//! - [`subjects`], [`courses`], [`study_groups`]: curriculum
//! - [`reports`]: generated report records
//!
//! # Example
//!
//! ```ignore
//! use study_models::tutors::{Tutor, TutorWrite};
//!
//! let write = TutorWrite::from(&tutor);
//! assert_eq!(serde_json::to_value(write)?["user"], 9);
//! ```

pub mod courses;
pub mod ids;
pub mod reports;
pub mod students;
pub mod study_groups;
pub mod subjects;
pub mod tutors;
pub mod users;

pub use courses::{Course, CourseRead, CourseSubject, CreateCoursePayload, TutorRef, UpdateCourseDto};
pub use ids::{CourseId, Ref, ReportId, StudentId, StudyGroupId, SubjectId, TutorId, UserId};
pub use reports::{CreateReportDto, Report, ReportStatus, ReportType, UpdateReportDto};
pub use students::{
    CreateStudentDto, Gender, Student, StudentRead, StudentWrite, UpdateStudentDto,
};
pub use study_groups::{CreateStudyGroupPayload, StudyGroup, StudyGroupRead, UpdateStudyGroupDto};
pub use subjects::{CreateSubjectDto, Subject, UpdateSubjectDto};
pub use tutors::{CreateTutorDto, Tutor, TutorRead, TutorWithUser, TutorWrite, UpdateTutorDto};
pub use users::{CreateUserDto, Credential, Role, UpdateUserDto, User, UserRead};
