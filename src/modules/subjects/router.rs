use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::options::{COLLECTION_METHODS, ITEM_METHODS, describe};
use crate::state::AppState;

use super::controller::{create_subject, delete_subject, get_subject, get_subjects, update_subject};

pub fn init_subjects_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_subject)
                .get(get_subjects)
                .options(|| async { describe("Subject List", COLLECTION_METHODS) }),
        )
        .route(
            "/{id}",
            get(get_subject)
                .put(update_subject)
                .patch(update_subject)
                .delete(delete_subject)
                .options(|| async { describe("Subject Instance", ITEM_METHODS) }),
        )
}
