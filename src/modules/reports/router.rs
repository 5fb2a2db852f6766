use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::options::{COLLECTION_METHODS, ITEM_METHODS, describe};
use crate::state::AppState;

use super::controller::{create_report, delete_report, get_report, get_reports, update_report};

pub fn init_reports_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_report)
                .get(get_reports)
                .options(|| async { describe("Report List", COLLECTION_METHODS) }),
        )
        .route(
            "/{id}",
            get(get_report)
                .put(update_report)
                .patch(update_report)
                .delete(delete_report)
                .options(|| async { describe("Report Instance", ITEM_METHODS) }),
        )
}
