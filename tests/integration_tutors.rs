mod common;

use axum::http::StatusCode;
use common::{
    count_rows, create_admin, create_test_course, create_test_tutor, create_test_user,
    create_tutor_user, request, send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_tutor_with_write_shape(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let ivan = create_test_user(&pool, "ivan", None, false).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        request(
            "POST",
            "/api/v1/tutors",
            Some(&admin.key),
            Some(json!({"user": ivan.id.0})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"user": ivan.id.0}));
    assert_eq!(count_rows(&pool, "tutors").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_non_admin_cannot_create_tutor(pool: PgPool) {
    let tutor = create_tutor_user(&pool).await;
    let ivan = create_test_user(&pool, "ivan", None, false).await;

    let (status, _) = send(
        setup_test_app(pool.clone()),
        request(
            "POST",
            "/api/v1/tutors",
            Some(&tutor.key),
            Some(json!({"user": ivan.id.0})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(count_rows(&pool, "tutors").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tutor_for_unknown_user_rejected(pool: PgPool) {
    let admin = create_admin(&pool).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        request("POST", "/api/v1/tutors", Some(&admin.key), Some(json!({"user": 999}))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(count_rows(&pool, "tutors").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_second_tutor_for_same_user_rejected(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let ivan = create_test_user(&pool, "ivan", None, false).await;
    create_test_tutor(&pool, ivan.id).await;

    let (status, _) = send(
        setup_test_app(pool.clone()),
        request(
            "POST",
            "/api/v1/tutors",
            Some(&admin.key),
            Some(json!({"user": ivan.id.0})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(count_rows(&pool, "tutors").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_read_shape_nests_user(pool: PgPool) {
    let ivan = create_test_user(&pool, "ivan", None, false).await;
    let tutor_id = create_test_tutor(&pool, ivan.id).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        request("GET", "/api/v1/tutors", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "user": {"id": ivan.id.0, "first_name": "Test", "last_name": "ivan"}
        }])
    );

    let (status, body) = send(
        setup_test_app(pool),
        request("GET", &format!("/api/v1/tutors/{}", tutor_id), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], json!(ivan.id.0));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_returns_write_shape(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let ivan = create_test_user(&pool, "ivan", None, false).await;
    let olga = create_test_user(&pool, "olga", None, false).await;
    let tutor_id = create_test_tutor(&pool, ivan.id).await;

    let (status, body) = send(
        setup_test_app(pool),
        request(
            "PUT",
            &format!("/api/v1/tutors/{}", tutor_id),
            Some(&admin.key),
            Some(json!({"user": olga.id.0})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"user": olga.id.0}));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_tutor_detaches_courses(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let ivan = create_test_user(&pool, "ivan", None, false).await;
    let tutor_id = create_test_tutor(&pool, ivan.id).await;
    let course_id = create_test_course(&pool, "History", Some(tutor_id), &[]).await;

    let (status, _) = send(
        setup_test_app(pool.clone()),
        request(
            "DELETE",
            &format!("/api/v1/tutors/{}", tutor_id),
            Some(&admin.key),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        setup_test_app(pool.clone()),
        request("GET", &format!("/api/v1/courses/{}", course_id), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["tutor"].is_null());
    assert_eq!(count_rows(&pool, "users").await, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_unknown_tutor_returns_404(pool: PgPool) {
    let admin = create_admin(&pool).await;

    let (status, _) = send(
        setup_test_app(pool),
        request("DELETE", "/api/v1/tutors/999", Some(&admin.key), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
