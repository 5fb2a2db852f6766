use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::options::{COLLECTION_METHODS, ITEM_METHODS, describe};
use crate::state::AppState;

use super::controller::{create_course, delete_course, get_course, get_courses, update_course};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_course)
                .get(get_courses)
                .options(|| async { describe("Course List", COLLECTION_METHODS) }),
        )
        .route(
            "/{id}",
            get(get_course)
                .put(update_course)
                .patch(update_course)
                .delete(delete_course)
                .options(|| async { describe("Course Instance", ITEM_METHODS) }),
        )
}
