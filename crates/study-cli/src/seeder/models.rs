//! Data models for database seeding configuration.

use study_models::{CourseId, Gender, Role, StudyGroupId, SubjectId, TutorId};

/// Seed data for creating a user.
pub struct UserSeed {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub password_hash: String,
    pub key: String,
}

/// Seed data for creating a course.
pub struct CourseSeed {
    pub name: String,
    pub tutor_id: Option<TutorId>,
    pub subject_ids: Vec<SubjectId>,
}

/// Seed data for creating a study group.
pub struct StudyGroupSeed {
    pub name: String,
    pub course_id: CourseId,
}

/// Seed data for creating a student on top of a seeded user.
pub struct StudentSeed {
    pub user: UserSeed,
    pub gender: Gender,
    pub study_group_id: StudyGroupId,
}

/// Configuration for curriculum size.
#[derive(Clone)]
pub struct Curriculum {
    pub subjects: usize,
    pub courses: usize,
    pub subjects_per_course: usize,
}

impl Default for Curriculum {
    fn default() -> Self {
        Self {
            subjects: 12,
            courses: 6,
            subjects_per_course: 4,
        }
    }
}

/// Configuration for people per course and group.
#[derive(Clone)]
pub struct Enrollment {
    pub tutors: usize,
    pub groups_per_course: usize,
    pub students_per_group: usize,
}

impl Default for Enrollment {
    fn default() -> Self {
        Self {
            tutors: 4,
            groups_per_course: 2,
            students_per_group: 20,
        }
    }
}

/// Complete configuration for database seeding.
#[derive(Clone, Default)]
pub struct SeedConfig {
    pub curriculum: Curriculum,
    pub enrollment: Enrollment,
    /// Password shared by every seeded account
    pub password: String,
}

impl SeedConfig {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn with_curriculum(mut self, curriculum: Curriculum) -> Self {
        self.curriculum = curriculum;
        self
    }

    pub fn with_enrollment(mut self, enrollment: Enrollment) -> Self {
        self.enrollment = enrollment;
        self
    }
}
