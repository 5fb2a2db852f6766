//! Subject, course and study group seeding.

use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use study_models::{CourseId, StudyGroupId, SubjectId, TutorId};

use super::models::{CourseSeed, StudyGroupSeed};

const SUBJECT_NAMES: [&str; 12] = [
    "Mathematics",
    "Statistics",
    "Sociology",
    "Psychology",
    "Philosophy",
    "History",
    "Economics",
    "Biology",
    "Chemistry",
    "Physics",
    "Literature",
    "Computer Science",
];

const COURSE_NAMES: [&str; 6] = [
    "Applied Psychology",
    "Social Sciences",
    "Data Analysis",
    "Natural Sciences",
    "Humanities",
    "Engineering Basics",
];

fn numbered(names: &[&str], i: usize) -> String {
    let base = names[i % names.len()];
    match i / names.len() {
        0 => base.to_string(),
        round => format!("{} {}", base, round + 1),
    }
}

/// Generates subject names
pub fn generate_subjects(count: usize) -> Vec<String> {
    (0..count).map(|i| numbered(&SUBJECT_NAMES, i)).collect()
}

/// Generates courses, assigning tutors round-robin and a sliding window of
/// subjects to each course
pub fn generate_courses(
    count: usize,
    tutor_ids: &[TutorId],
    subject_ids: &[SubjectId],
    subjects_per_course: usize,
) -> Vec<CourseSeed> {
    let per_course = subjects_per_course.min(subject_ids.len());

    (0..count)
        .into_par_iter()
        .map(|i| {
            let tutor_id = (!tutor_ids.is_empty()).then(|| tutor_ids[i % tutor_ids.len()]);
            let subject_ids = (0..per_course)
                .map(|offset| subject_ids[(i + offset) % subject_ids.len()])
                .collect();

            CourseSeed {
                name: numbered(&COURSE_NAMES, i),
                tutor_id,
                subject_ids,
            }
        })
        .collect()
}

/// Generates study groups for courses, e.g. "AP-101", "AP-102"
pub fn generate_groups(
    courses: &[(CourseId, String)],
    groups_per_course: usize,
) -> Vec<StudyGroupSeed> {
    courses
        .par_iter()
        .flat_map(|(course_id, course_name)| {
            let prefix: String = course_name
                .split_whitespace()
                .filter_map(|word| word.chars().next())
                .flat_map(char::to_uppercase)
                .collect();

            (0..groups_per_course)
                .map(|i| StudyGroupSeed {
                    name: format!("{}-{}", prefix, 101 + i),
                    course_id: *course_id,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Seeds subjects into the database
pub async fn seed_subjects(
    db: &PgPool,
    count: usize,
) -> Result<Vec<SubjectId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📚 Seeding {} subjects...", count);

    let names = generate_subjects(count);
    let ids: Vec<SubjectId> =
        sqlx::query_scalar("INSERT INTO subjects (name) SELECT * FROM UNNEST($1::varchar[]) RETURNING id")
            .bind(&names)
            .fetch_all(db)
            .await?;

    println!(
        "   ✓ Inserted {} subjects in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Seeds courses with their tutors and subjects. Returns `(id, name)` pairs.
pub async fn seed_courses(
    db: &PgPool,
    count: usize,
    tutor_ids: &[TutorId],
    subject_ids: &[SubjectId],
    subjects_per_course: usize,
) -> Result<Vec<(CourseId, String)>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🏫 Seeding {} courses ({} subjects each)...",
        count, subjects_per_course
    );

    let courses = generate_courses(count, tutor_ids, subject_ids, subjects_per_course);

    let mut tx = db.begin().await?;
    let mut seeded = Vec::with_capacity(courses.len());
    for course in &courses {
        let id = insert_course(&mut tx, course).await?;
        seeded.push((id, course.name.clone()));
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} courses in {:?}",
        seeded.len(),
        start_time.elapsed()
    );

    Ok(seeded)
}

async fn insert_course(
    tx: &mut Transaction<'_, Postgres>,
    course: &CourseSeed,
) -> Result<CourseId, Box<dyn std::error::Error>> {
    let id: CourseId =
        sqlx::query_scalar("INSERT INTO courses (name, tutor_id) VALUES ($1, $2) RETURNING id")
            .bind(&course.name)
            .bind(course.tutor_id)
            .fetch_one(&mut **tx)
            .await?;

    // WITH ORDINALITY keeps the attach order in course_subjects.id
    sqlx::query(
        r#"INSERT INTO course_subjects (course_id, subject_id)
        SELECT $1, s.subject_id
        FROM UNNEST($2::bigint[]) WITH ORDINALITY AS s(subject_id, ord)
        ORDER BY s.ord"#,
    )
    .bind(id)
    .bind(&course.subject_ids)
    .execute(&mut **tx)
    .await?;

    Ok(id)
}

/// Seeds study groups for the given courses
pub async fn seed_groups(
    db: &PgPool,
    courses: &[(CourseId, String)],
    groups_per_course: usize,
) -> Result<Vec<StudyGroupId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "👥 Seeding {} study groups ({} per course)...",
        courses.len() * groups_per_course,
        groups_per_course
    );

    let groups = generate_groups(courses, groups_per_course);
    let (names, course_ids): (Vec<String>, Vec<CourseId>) =
        groups.into_iter().map(|g| (g.name, g.course_id)).unzip();

    let ids: Vec<StudyGroupId> = sqlx::query_scalar(
        r#"INSERT INTO study_groups (name, course_id)
        SELECT * FROM UNNEST($1::varchar[], $2::bigint[])
        RETURNING id"#,
    )
    .bind(&names)
    .bind(&course_ids)
    .fetch_all(db)
    .await?;

    println!(
        "   ✓ Inserted {} study groups in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}
