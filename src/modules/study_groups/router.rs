use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::options::{COLLECTION_METHODS, ITEM_METHODS, describe};
use crate::state::AppState;

use super::controller::{
    create_study_group, delete_study_group, get_study_group, get_study_groups, update_study_group,
};

pub fn init_study_groups_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_study_group)
                .get(get_study_groups)
                .options(|| async { describe("Study Group List", COLLECTION_METHODS) }),
        )
        .route(
            "/{id}",
            get(get_study_group)
                .put(update_study_group)
                .patch(update_study_group)
                .delete(delete_study_group)
                .options(|| async { describe("Study Group Instance", ITEM_METHODS) }),
        )
}
