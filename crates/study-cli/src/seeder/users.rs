//! Tutor and student seeding.
//!
//! Every seeded account gets its credential in the same transaction as the
//! user row, so seeded data keeps the one-credential-per-user rule.

use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use study_auth::generate_key;
use study_models::{Gender, Role, StudentId, StudyGroupId, TutorId, UserId};

use super::models::{StudentSeed, UserSeed};

// 5 params per user
const USER_BATCH_SIZE: usize = 1000;
// 3 params per student
const STUDENT_BATCH_SIZE: usize = 2000;

/// Generates tutor accounts
pub fn generate_tutors(count: usize, run_tag: &str, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| generate_user(Role::Tutor, run_tag, idx, password_hash))
        .collect()
}

/// Generates students spread evenly over the given groups
pub fn generate_students(
    group_ids: &[StudyGroupId],
    students_per_group: usize,
    run_tag: &str,
    password_hash: &str,
) -> Vec<StudentSeed> {
    group_ids
        .par_iter()
        .enumerate()
        .flat_map(|(group_idx, &study_group_id)| {
            (0..students_per_group)
                .map(|student_idx| {
                    let user = generate_user(
                        Role::Student,
                        run_tag,
                        group_idx * students_per_group + student_idx,
                        password_hash,
                    );
                    let gender = if student_idx % 2 == 0 {
                        Gender::Female
                    } else {
                        Gender::Male
                    };
                    StudentSeed {
                        user,
                        gender,
                        study_group_id,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn generate_user(role: Role, run_tag: &str, idx: usize, password_hash: &str) -> UserSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    let username = format!(
        "{}.{}+{}{}{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        role.as_str(),
        run_tag,
        idx
    );

    UserSeed {
        username,
        first_name,
        last_name,
        role,
        password_hash: password_hash.to_string(),
        key: generate_key(),
    }
}

/// Seeds tutors and their user accounts
pub async fn seed_tutors(
    db: &PgPool,
    count: usize,
    run_tag: &str,
    password_hash: &str,
) -> Result<Vec<TutorId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🧑‍🏫 Seeding {} tutors...", count);

    let users = generate_tutors(count, run_tag, password_hash);

    let mut tx = db.begin().await?;
    let user_ids = insert_users(&mut tx, &users).await?;
    let tutor_ids: Vec<TutorId> =
        sqlx::query_scalar("INSERT INTO tutors (user_id) SELECT * FROM UNNEST($1::bigint[]) RETURNING id")
            .bind(&user_ids)
            .fetch_all(&mut *tx)
            .await?;
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} tutors in {:?}",
        tutor_ids.len(),
        start_time.elapsed()
    );

    Ok(tutor_ids)
}

/// Seeds students into the given groups
pub async fn seed_students(
    db: &PgPool,
    group_ids: &[StudyGroupId],
    students_per_group: usize,
    run_tag: &str,
    password_hash: &str,
) -> Result<Vec<StudentId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🎓 Seeding {} students ({} per group)...",
        group_ids.len() * students_per_group,
        students_per_group
    );

    let students = generate_students(group_ids, students_per_group, run_tag, password_hash);
    let (users, placements): (Vec<UserSeed>, Vec<(Gender, StudyGroupId)>) = students
        .into_iter()
        .map(|s| (s.user, (s.gender, s.study_group_id)))
        .unzip();

    let mut tx = db.begin().await?;
    let user_ids = insert_users(&mut tx, &users).await?;

    let mut student_ids = Vec::with_capacity(user_ids.len());
    let rows: Vec<(UserId, (Gender, StudyGroupId))> =
        user_ids.into_iter().zip(placements).collect();
    for chunk in rows.chunks(STUDENT_BATCH_SIZE) {
        student_ids.extend(insert_students_chunk(&mut tx, chunk).await?);
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        student_ids.len(),
        start_time.elapsed()
    );

    Ok(student_ids)
}

/// Inserts users and their credentials in batches, returning ids in input order
pub async fn insert_users(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    let mut ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(USER_BATCH_SIZE) {
        let chunk_ids = insert_users_chunk(tx, chunk).await?;
        insert_credentials_chunk(tx, &chunk_ids, chunk).await?;
        ids.extend(chunk_ids);
    }

    Ok(ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from(
        "INSERT INTO users (username, first_name, last_name, role, password) VALUES ",
    );

    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 5;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4,
            param_idx + 5
        ));
    }

    // a multi-row VALUES insert returns rows in VALUES order
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for user in users {
        q = q
            .bind(&user.username)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.role)
            .bind(&user.password_hash);
    }

    let ids: Vec<UserId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

async fn insert_credentials_chunk(
    tx: &mut Transaction<'_, Postgres>,
    user_ids: &[UserId],
    users: &[UserSeed],
) -> Result<(), Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(());
    }

    let mut query = String::from("INSERT INTO auth_tokens (key, user_id) VALUES ");
    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 2;
        query.push_str(&format!("(${}, ${})", param_idx + 1, param_idx + 2));
    }

    let mut q = sqlx::query(&query);
    for (user_id, user) in user_ids.iter().zip(users) {
        q = q.bind(&user.key).bind(user_id);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[(UserId, (Gender, StudyGroupId))],
) -> Result<Vec<StudentId>, Box<dyn std::error::Error>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO students (user_id, gender, study_group_id) VALUES ");
    for i in 0..rows.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 3;
        query.push_str(&format!(
            "(${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3
        ));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for (user_id, (gender, group_id)) in rows {
        q = q.bind(user_id).bind(gender).bind(group_id);
    }

    let ids: Vec<StudentId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_tutors() {
        let tutors = generate_tutors(10, "ab12", "hash");
        assert_eq!(tutors.len(), 10);
        assert!(tutors.iter().all(|t| t.role == Role::Tutor));
        assert!(tutors.iter().all(|t| t.password_hash == "hash"));
        assert!(tutors.iter().all(|t| t.username.contains("+tutorab12")));
    }

    #[test]
    fn test_generated_usernames_and_keys_are_unique() {
        let tutors = generate_tutors(50, "ab12", "hash");
        let usernames: HashSet<_> = tutors.iter().map(|t| t.username.as_str()).collect();
        let keys: HashSet<_> = tutors.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(usernames.len(), 50);
        assert_eq!(keys.len(), 50);
    }

    #[test]
    fn test_generate_students_per_group() {
        let groups = [StudyGroupId(1), StudyGroupId(2), StudyGroupId(3)];
        let students = generate_students(&groups, 4, "ab12", "hash");
        assert_eq!(students.len(), 12);
        for group in groups {
            let in_group: Vec<_> = students
                .iter()
                .filter(|s| s.study_group_id == group)
                .collect();
            assert_eq!(in_group.len(), 4);
            assert!(in_group.iter().any(|s| s.gender == Gender::Female));
            assert!(in_group.iter().any(|s| s.gender == Gender::Male));
        }
        assert!(students.iter().all(|s| s.user.role == Role::Student));
    }

    #[test]
    fn test_large_groups_do_not_share_usernames() {
        let groups = [StudyGroupId(1), StudyGroupId(2)];
        let students = generate_students(&groups, 1001, "ab12", "hash");
        let usernames: HashSet<_> = students.iter().map(|s| s.user.username.as_str()).collect();
        assert_eq!(usernames.len(), 2002);
    }
}
