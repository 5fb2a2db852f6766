#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use study::router::init_router;
use study::state::AppState;
use study_auth::generate_key;
use study_config::CorsConfig;
use study_models::{CourseId, Gender, Role, StudentId, StudyGroupId, SubjectId, TutorId, UserId};
use tower::ServiceExt;

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState {
        db: pool,
        cors_config: CorsConfig::default(),
    };
    init_router(state)
}

pub struct TestUser {
    pub id: UserId,
    pub key: String,
}

/// Inserts a user together with its credential.
pub async fn create_test_user(
    pool: &PgPool,
    username: &str,
    role: Option<Role>,
    is_staff: bool,
) -> TestUser {
    let mut tx = pool.begin().await.unwrap();

    let id: UserId = sqlx::query_scalar(
        r#"INSERT INTO users (username, first_name, last_name, role, is_staff)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id"#,
    )
    .bind(username)
    .bind("Test")
    .bind(username)
    .bind(role)
    .bind(is_staff)
    .fetch_one(&mut *tx)
    .await
    .unwrap();

    let key = generate_key();
    sqlx::query("INSERT INTO auth_tokens (key, user_id) VALUES ($1, $2)")
        .bind(&key)
        .bind(id)
        .execute(&mut *tx)
        .await
        .unwrap();

    tx.commit().await.unwrap();

    TestUser { id, key }
}

pub async fn create_admin(pool: &PgPool) -> TestUser {
    create_test_user(pool, "admin", Some(Role::Admin), false).await
}

pub async fn create_tutor_user(pool: &PgPool) -> TestUser {
    create_test_user(pool, "tutor", Some(Role::Tutor), false).await
}

pub async fn create_test_tutor(pool: &PgPool, user_id: UserId) -> TutorId {
    sqlx::query_scalar("INSERT INTO tutors (user_id) VALUES ($1) RETURNING id")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_subject(pool: &PgPool, name: &str) -> SubjectId {
    sqlx::query_scalar("INSERT INTO subjects (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_course(
    pool: &PgPool,
    name: &str,
    tutor_id: Option<TutorId>,
    subject_ids: &[SubjectId],
) -> CourseId {
    let id: CourseId =
        sqlx::query_scalar("INSERT INTO courses (name, tutor_id) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(tutor_id)
            .fetch_one(pool)
            .await
            .unwrap();

    for subject_id in subject_ids {
        sqlx::query("INSERT INTO course_subjects (course_id, subject_id) VALUES ($1, $2)")
            .bind(id)
            .bind(subject_id)
            .execute(pool)
            .await
            .unwrap();
    }

    id
}

pub async fn create_test_group(pool: &PgPool, name: &str, course_id: CourseId) -> StudyGroupId {
    sqlx::query_scalar("INSERT INTO study_groups (name, course_id) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(course_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_student(
    pool: &PgPool,
    user_id: UserId,
    study_group_id: Option<StudyGroupId>,
) -> StudentId {
    sqlx::query_scalar(
        "INSERT INTO students (user_id, gender, study_group_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind(Gender::Female)
    .bind(study_group_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Builds a request, optionally authenticated with `Token <key>` and
/// carrying a JSON body.
pub fn request(method: &str, uri: &str, key: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header("authorization", format!("Token {}", key));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends a request and returns the status and the JSON body (`Null` when empty).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
