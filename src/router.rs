use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use study_observability::{logging_middleware, metrics_middleware};

use crate::docs::ApiDoc;
use crate::middleware::{authenticate, require_admin, require_tutor};
use crate::modules::courses::init_courses_router;
use crate::modules::reports::init_reports_router;
use crate::modules::students::init_students_router;
use crate::modules::study_groups::init_study_groups_router;
use crate::modules::subjects::init_subjects_router;
use crate::modules::tutors::init_tutors_router;
use crate::modules::users::init_users_router;
use crate::state::AppState;

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let admin_only = || middleware::from_fn_with_state(state.clone(), require_admin);

    let api = Router::new()
        .nest("/users", init_users_router())
        .nest("/tutors", init_tutors_router().route_layer(admin_only()))
        .nest(
            "/students",
            init_students_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_tutor)),
        )
        .nest("/subjects", init_subjects_router().route_layer(admin_only()))
        .nest("/courses", init_courses_router().route_layer(admin_only()))
        .nest("/study_groups", init_study_groups_router().route_layer(admin_only()))
        .nest("/reports", init_reports_router().route_layer(admin_only()))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/api/v1", api)
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
