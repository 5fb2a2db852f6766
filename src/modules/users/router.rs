use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::options::{COLLECTION_METHODS, ITEM_METHODS, describe};
use crate::state::AppState;

use super::controller::{create_user, delete_user, get_user, get_users, update_user};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_user)
                .get(get_users)
                .options(|| async { describe("User List", COLLECTION_METHODS) }),
        )
        .route(
            "/{id}",
            get(get_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user)
                .options(|| async { describe("User Instance", ITEM_METHODS) }),
        )
}
