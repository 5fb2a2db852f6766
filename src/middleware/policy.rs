//! Route-layer middleware applying a collection [`Policy`].
//!
//! ```rust,ignore
//! init_subjects_router()
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use study_auth::Policy;
use study_core::AppError;

use crate::middleware::auth::Caller;
use crate::state::AppState;

pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";

async fn enforce(
    state: AppState,
    req: Request,
    next: Next,
    policy: Policy,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let caller = Caller::from_request_parts(&mut parts, &state).await?;

    if !policy.permits(caller.identity(), &parts.method) {
        tracing::debug!(policy = policy.name(), method = %parts.method, "Permission denied");
        return Err(AppError::forbidden(PERMISSION_DENIED.to_string()));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match enforce(state, req, next, Policy::IsAdmin).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_tutor(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match enforce(state, req, next, Policy::IsTutor).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
