use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sqlx::PgPool;
use tracing::instrument;

use study_auth::{Identity, parse_authorization};
use study_core::AppError;
use study_models::User;

use crate::state::AppState;

/// The caller behind a request; `None` for anonymous requests.
///
/// Resolved once per request and cached in the request extensions, so the
/// authentication layer, policy layers and handlers all see the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub Option<Identity>);

impl Caller {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

/// Looks up the credential named in the `Authorization` header.
///
/// No header means an anonymous caller. A header that is malformed or names
/// an unknown key is rejected with 401.
#[instrument(skip(db, headers))]
pub async fn resolve_caller(db: &PgPool, headers: &HeaderMap) -> Result<Caller, AppError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(Caller(None));
    };

    let key = value
        .to_str()
        .ok()
        .and_then(parse_authorization)
        .ok_or_else(|| AppError::unauthorized("Invalid token header".to_string()))?;

    let user = sqlx::query_as::<_, User>(
        r#"SELECT u.id, u.username, u.first_name, u.last_name, u.role, u.is_staff, u.date_joined
           FROM auth_tokens t
           JOIN users u ON u.id = t.user_id
           WHERE t.key = $1"#,
    )
    .bind(key)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::unauthorized("Invalid token".to_string()))?;

    Ok(Caller(Some(Identity::from(&user))))
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(caller) = parts.extensions.get::<Caller>() {
            return Ok(*caller);
        }

        let caller = resolve_caller(&state.db, &parts.headers).await?;
        parts.extensions.insert(caller);
        Ok(caller)
    }
}

/// Resolves the caller for every API request, rejecting bad credentials
/// before any handler runs.
pub async fn authenticate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    match Caller::from_request_parts(&mut parts, &state).await {
        Ok(_) => next.run(Request::from_parts(parts, body)).await,
        Err(err) => err.into_response(),
    }
}

