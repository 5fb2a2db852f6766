mod common;

use axum::http::StatusCode;
use common::{
    count_rows, create_admin, create_test_course, create_test_group, create_test_student,
    create_test_subject, create_test_user, create_tutor_user, request, send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_group_echoes_payload(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let course_id = create_test_course(&pool, "Psychology", None, &[]).await;
    let payload = json!({"name": "PS-101", "course": course_id.0});

    let (status, body) = send(
        setup_test_app(pool.clone()),
        request("POST", "/api/v1/study_groups", Some(&admin.key), Some(payload.clone())),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, payload);
    assert_eq!(count_rows(&pool, "study_groups").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_course_creates_nothing(pool: PgPool) {
    let admin = create_admin(&pool).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        request(
            "POST",
            "/api/v1/study_groups",
            Some(&admin.key),
            Some(json!({"name": "PS-101", "course": {"id": 999}})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Course does not exist"}));
    assert_eq!(count_rows(&pool, "study_groups").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_read_shape_embeds_course(pool: PgPool) {
    let sociology = create_test_subject(&pool, "Sociology").await;
    let course_id = create_test_course(&pool, "Psychology", None, &[sociology]).await;
    let group_id = create_test_group(&pool, "PS-101", course_id).await;

    let (status, body) = send(
        setup_test_app(pool),
        request("GET", &format!("/api/v1/study_groups/{}", group_id), None, None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "name": "PS-101",
            "course": {
                "id": course_id.0,
                "name": "Psychology",
                "tutor": null,
                "subjects": [{"id": sociology.0, "name": "Sociology"}]
            }
        })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_group_name(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let course_id = create_test_course(&pool, "Psychology", None, &[]).await;
    let group_id = create_test_group(&pool, "PS-101", course_id).await;

    let (status, body) = send(
        setup_test_app(pool),
        request(
            "PATCH",
            &format!("/api/v1/study_groups/{}", group_id),
            Some(&admin.key),
            Some(json!({"name": "PS-201"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "PS-201");
    assert_eq!(body["course"]["id"], json!(course_id.0));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tutor_cannot_create_group(pool: PgPool) {
    let tutor = create_tutor_user(&pool).await;
    let course_id = create_test_course(&pool, "Psychology", None, &[]).await;

    let (status, _) = send(
        setup_test_app(pool.clone()),
        request(
            "POST",
            "/api/v1/study_groups",
            Some(&tutor.key),
            Some(json!({"name": "PS-101", "course": course_id.0})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(count_rows(&pool, "study_groups").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_group_keeps_students(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let course_id = create_test_course(&pool, "Psychology", None, &[]).await;
    let group_id = create_test_group(&pool, "PS-101", course_id).await;
    let anna = create_test_user(&pool, "anna", None, false).await;
    let student_id = create_test_student(&pool, anna.id, Some(group_id)).await;

    let (status, _) = send(
        setup_test_app(pool.clone()),
        request(
            "DELETE",
            &format!("/api/v1/study_groups/{}", group_id),
            Some(&admin.key),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        setup_test_app(pool),
        request("GET", &format!("/api/v1/students/{}", student_id), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["study_group"].is_null());
}
