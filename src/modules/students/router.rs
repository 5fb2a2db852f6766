use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::options::{COLLECTION_METHODS, ITEM_METHODS, describe};
use crate::state::AppState;

use super::controller::{
    create_student, delete_student, get_student, get_students, update_student,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_student)
                .get(get_students)
                .options(|| async { describe("Student List", COLLECTION_METHODS) }),
        )
        .route(
            "/{id}",
            get(get_student)
                .put(update_student)
                .patch(update_student)
                .delete(delete_student)
                .options(|| async { describe("Student Instance", ITEM_METHODS) }),
        )
}
