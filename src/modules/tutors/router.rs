use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::options::{COLLECTION_METHODS, ITEM_METHODS, describe};
use crate::state::AppState;

use super::controller::{create_tutor, delete_tutor, get_tutor, get_tutors, update_tutor};

pub fn init_tutors_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_tutor)
                .get(get_tutors)
                .options(|| async { describe("Tutor List", COLLECTION_METHODS) }),
        )
        .route(
            "/{id}",
            get(get_tutor)
                .put(update_tutor)
                .patch(update_tutor)
                .delete(delete_tutor)
                .options(|| async { describe("Tutor Instance", ITEM_METHODS) }),
        )
}
