//! Database seeding with fake curriculum and people.
//!
//! Seeding runs bottom-up: subjects, tutors, courses, study groups and
//! finally students. Every run tags its usernames so repeated runs do not
//! collide.

pub mod curriculum;
pub mod models;
pub mod users;

pub use models::{Curriculum, Enrollment, SeedConfig};

use sqlx::PgPool;
use std::time::Instant;
use study_auth::generate_key;
use study_core::hash_password;

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let SeedConfig {
        curriculum,
        enrollment,
        password,
    } = config;

    println!("🌱 Starting database seeding...");
    println!(
        "   - Subjects: {}, courses: {} ({} subjects each)",
        curriculum.subjects, curriculum.courses, curriculum.subjects_per_course
    );
    println!(
        "   - Tutors: {}, groups per course: {}, students per group: {}",
        enrollment.tutors, enrollment.groups_per_course, enrollment.students_per_group
    );

    let run_tag: String = generate_key().chars().take(6).collect();
    let password_hash = hash_password(&password).map_err(|e| e.error)?;

    let subject_ids = curriculum::seed_subjects(db, curriculum.subjects).await?;
    let tutor_ids = users::seed_tutors(db, enrollment.tutors, &run_tag, &password_hash).await?;
    let courses = curriculum::seed_courses(
        db,
        curriculum.courses,
        &tutor_ids,
        &subject_ids,
        curriculum.subjects_per_course,
    )
    .await?;
    let group_ids = curriculum::seed_groups(db, &courses, enrollment.groups_per_course).await?;
    let student_ids = users::seed_students(
        db,
        &group_ids,
        enrollment.students_per_group,
        &run_tag,
        &password_hash,
    )
    .await?;

    println!(
        "\n✅ Seeded {} subjects, {} tutors, {} courses, {} groups and {} students in {:?}",
        subject_ids.len(),
        tutor_ids.len(),
        courses.len(),
        group_ids.len(),
        student_ids.len(),
        start_time.elapsed()
    );

    Ok(())
}
