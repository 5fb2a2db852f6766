mod common;

use axum::http::StatusCode;
use common::{
    count_rows, create_admin, create_test_course, create_test_group, create_test_student,
    create_test_user, create_tutor_user, request, send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_tutor_creates_student_with_write_shape(pool: PgPool) {
    let tutor = create_tutor_user(&pool).await;
    let anna = create_test_user(&pool, "anna", None, false).await;
    let course_id = create_test_course(&pool, "Psychology", None, &[]).await;
    let group_id = create_test_group(&pool, "PS-101", course_id).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        request(
            "POST",
            "/api/v1/students",
            Some(&tutor.key),
            Some(json!({"user": anna.id.0, "study_group": group_id.0})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"], json!(anna.id.0));
    assert_eq!(body["study_group"], json!(group_id.0));
    assert_eq!(body["gender"], "MALE");
    assert_eq!(count_rows(&pool, "students").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_is_not_a_tutor(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let anna = create_test_user(&pool, "anna", None, false).await;

    let (status, _) = send(
        setup_test_app(pool.clone()),
        request(
            "POST",
            "/api/v1/students",
            Some(&admin.key),
            Some(json!({"user": anna.id.0})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(count_rows(&pool, "students").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_gender_rejected(pool: PgPool) {
    let tutor = create_tutor_user(&pool).await;
    let anna = create_test_user(&pool, "anna", None, false).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        request(
            "POST",
            "/api/v1/students",
            Some(&tutor.key),
            Some(json!({"user": anna.id.0, "gender": "OTHER"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(count_rows(&pool, "students").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_read_shape_nests_user_and_group(pool: PgPool) {
    let anna = create_test_user(&pool, "anna", None, false).await;
    let course_id = create_test_course(&pool, "Psychology", None, &[]).await;
    let group_id = create_test_group(&pool, "PS-101", course_id).await;
    create_test_student(&pool, anna.id, Some(group_id)).await;

    let (status, body) = send(
        setup_test_app(pool),
        request("GET", "/api/v1/students", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "user": {"id": anna.id.0, "first_name": "Test", "last_name": "anna"},
            "gender": "FEMALE",
            "study_group": {
                "name": "PS-101",
                "course": {"id": course_id.0, "name": "Psychology", "tutor": null, "subjects": []}
            }
        }])
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_clears_group(pool: PgPool) {
    let tutor = create_tutor_user(&pool).await;
    let anna = create_test_user(&pool, "anna", None, false).await;
    let course_id = create_test_course(&pool, "Psychology", None, &[]).await;
    let group_id = create_test_group(&pool, "PS-101", course_id).await;
    let student_id = create_test_student(&pool, anna.id, Some(group_id)).await;

    let (status, body) = send(
        setup_test_app(pool),
        request(
            "PATCH",
            &format!("/api/v1/students/{}", student_id),
            Some(&tutor.key),
            Some(json!({"study_group": null})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"user": anna.id.0, "gender": "FEMALE", "study_group": null}));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_user_removes_student(pool: PgPool) {
    let anna = create_test_user(&pool, "anna", None, false).await;
    create_test_student(&pool, anna.id, None).await;

    let (status, _) = send(
        setup_test_app(pool.clone()),
        request(
            "DELETE",
            &format!("/api/v1/users/{}", anna.id),
            Some(&anna.key),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(count_rows(&pool, "students").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_unknown_student_returns_404(pool: PgPool) {
    let tutor = create_tutor_user(&pool).await;

    let (status, _) = send(
        setup_test_app(pool),
        request("DELETE", "/api/v1/students/999", Some(&tutor.key), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
