mod common;

use axum::http::StatusCode;
use common::{
    count_rows, create_admin, create_test_course, create_test_group, create_test_subject,
    create_test_tutor, create_test_user, request, send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_echoes_payload(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let ivan = create_test_user(&pool, "ivan", None, false).await;
    create_test_tutor(&pool, ivan.id).await;
    let sociology = create_test_subject(&pool, "Sociology").await;
    let statistics = create_test_subject(&pool, "Statistics").await;

    let payload = json!({
        "name": "Psychology",
        "tutor": {"user": {"id": ivan.id.0}},
        "subjects": [{"id": statistics.0}, sociology.0]
    });

    let (status, body) = send(
        setup_test_app(pool.clone()),
        request("POST", "/api/v1/courses", Some(&admin.key), Some(payload.clone())),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, payload);
    assert_eq!(count_rows(&pool, "courses").await, 1);

    let (status, body) = send(
        setup_test_app(pool),
        request("GET", "/api/v1/courses", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let course = &body[0];
    assert_eq!(course["name"], "Psychology");
    assert_eq!(
        course["tutor"],
        json!({"user": {"id": ivan.id.0, "first_name": "Test", "last_name": "ivan"}})
    );
    assert_eq!(
        course["subjects"],
        json!([
            {"id": statistics.0, "name": "Statistics"},
            {"id": sociology.0, "name": "Sociology"}
        ])
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_without_tutor(pool: PgPool) {
    let admin = create_admin(&pool).await;

    let (status, _) = send(
        setup_test_app(pool.clone()),
        request(
            "POST",
            "/api/v1/courses",
            Some(&admin.key),
            Some(json!({"name": "History", "tutor": null, "subjects": []})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(
        setup_test_app(pool),
        request("GET", "/api/v1/courses", None, None),
    )
    .await;
    assert!(body[0]["tutor"].is_null());
    assert_eq!(body[0]["subjects"], json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_tutor_creates_nothing(pool: PgPool) {
    let admin = create_admin(&pool).await;
    // a user that is not a tutor
    let plain = create_test_user(&pool, "plain", None, false).await;

    for user in [plain.id.0, 999] {
        let (status, body) = send(
            setup_test_app(pool.clone()),
            request(
                "POST",
                "/api/v1/courses",
                Some(&admin.key),
                Some(json!({"name": "Psychology", "tutor": {"user": user}, "subjects": []})),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "Tutor does not exist"}));
    }

    assert_eq!(count_rows(&pool, "courses").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mixed_subjects_are_atomic(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let ivan = create_test_user(&pool, "ivan", None, false).await;
    create_test_tutor(&pool, ivan.id).await;
    let sociology = create_test_subject(&pool, "Sociology").await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        request(
            "POST",
            "/api/v1/courses",
            Some(&admin.key),
            Some(json!({
                "name": "Psychology",
                "tutor": {"user": ivan.id.0},
                "subjects": [sociology.0, 999]
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Subject does not exist"}));
    assert_eq!(count_rows(&pool, "courses").await, 0);
    assert_eq!(count_rows(&pool, "course_subjects").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_replaces_subjects(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let sociology = create_test_subject(&pool, "Sociology").await;
    let statistics = create_test_subject(&pool, "Statistics").await;
    let course_id = create_test_course(&pool, "Psychology", None, &[sociology]).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        request(
            "PATCH",
            &format!("/api/v1/courses/{}", course_id),
            Some(&admin.key),
            Some(json!({"subjects": [statistics.0]})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Psychology");
    assert_eq!(body["subjects"], json!([{"id": statistics.0, "name": "Statistics"}]));
    assert_eq!(count_rows(&pool, "course_subjects").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_with_unknown_subject_changes_nothing(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let sociology = create_test_subject(&pool, "Sociology").await;
    let course_id = create_test_course(&pool, "Psychology", None, &[sociology]).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        request(
            "PUT",
            &format!("/api/v1/courses/{}", course_id),
            Some(&admin.key),
            Some(json!({"name": "Renamed", "subjects": [999]})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Subject does not exist"}));

    let name: String = sqlx::query_scalar("SELECT name FROM courses WHERE id = $1")
        .bind(course_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Psychology");
    assert_eq!(count_rows(&pool, "course_subjects").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_detaches_tutor(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let ivan = create_test_user(&pool, "ivan", None, false).await;
    let tutor_id = create_test_tutor(&pool, ivan.id).await;
    let course_id = create_test_course(&pool, "Psychology", Some(tutor_id), &[]).await;

    let (status, body) = send(
        setup_test_app(pool),
        request(
            "PATCH",
            &format!("/api/v1/courses/{}", course_id),
            Some(&admin.key),
            Some(json!({"tutor": null})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["tutor"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_course_removes_groups(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let course_id = create_test_course(&pool, "Psychology", None, &[]).await;
    create_test_group(&pool, "PS-101", course_id).await;
    create_test_group(&pool, "PS-102", course_id).await;

    let (status, _) = send(
        setup_test_app(pool.clone()),
        request(
            "DELETE",
            &format!("/api/v1/courses/{}", course_id),
            Some(&admin.key),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(count_rows(&pool, "courses").await, 0);
    assert_eq!(count_rows(&pool, "study_groups").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_unknown_course_returns_404(pool: PgPool) {
    let (status, _) = send(
        setup_test_app(pool),
        request("GET", "/api/v1/courses/999", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_courses_listed_by_name(pool: PgPool) {
    let statistics = create_test_course(&pool, "Statistics", None, &[]).await;
    let algebra = create_test_course(&pool, "Algebra", None, &[]).await;

    let (status, body) = send(
        setup_test_app(pool),
        request("GET", "/api/v1/courses", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], json!(algebra.0));
    assert_eq!(body[0]["name"], "Algebra");
    assert_eq!(body[1]["id"], json!(statistics.0));
    assert_eq!(body[1]["name"], "Statistics");
}
