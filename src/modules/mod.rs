pub mod courses;
pub mod options;
pub mod reports;
pub mod students;
pub mod study_groups;
pub mod subjects;
pub mod tutors;
pub mod users;
