use axum::{
    Json,
    extract::{Path, State},
    http::{Method, StatusCode},
};
use tracing::instrument;

use study_auth::{can_grant_privileges, is_owner_or_staff};
use study_core::{AppError, ErrorResponse};
use study_models::{CreateUserDto, UpdateUserDto, UserId, UserRead};
use study_observability::track_user_created;

use crate::middleware::Caller;
use crate::middleware::policy::PERMISSION_DENIED;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

fn forbidden() -> AppError {
    AppError::forbidden(PERMISSION_DENIED.to_string())
}

/// Register a user. A credential is issued in the same transaction.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserRead),
        (status = 400, description = "Invalid input or username taken", body = ErrorResponse),
        (status = 403, description = "Only admins and staff may grant a role or staff status", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    caller: Caller,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserRead>), AppError> {
    if dto.grants_privileges() && !can_grant_privileges(caller.identity()) {
        return Err(forbidden());
    }

    let (user, _credential) = UserService::create_user(&state.db, dto).await?;
    track_user_created(user.role.map_or("none", |role| role.as_str()));

    Ok((StatusCode::CREATED, Json(UserRead::from(&user))))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All users", body = Vec<UserRead>)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserRead>>, AppError> {
    let users = UserService::get_users(&state.db).await?;
    Ok(Json(users.iter().map(UserRead::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserRead),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<UserRead>, AppError> {
    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(UserRead::from(&user)))
}

/// Partially update a user. Only the user itself or staff may do this.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserRead),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Not the owner and not staff", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    caller: Caller,
    method: Method,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<UserRead>, AppError> {
    let target = UserService::get_user(&state.db, id).await?;

    if !is_owner_or_staff(caller.identity(), &method, target.id) {
        return Err(forbidden());
    }
    if dto.grants_privileges() && !can_grant_privileges(caller.identity()) {
        return Err(forbidden());
    }

    let user = UserService::update_user(&state.db, id, dto).await?;
    Ok(Json(UserRead::from(&user)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Not the owner and not staff", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("token_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<UserId>,
) -> Result<StatusCode, AppError> {
    let target = UserService::get_user(&state.db, id).await?;

    if !is_owner_or_staff(caller.identity(), &Method::DELETE, target.id) {
        return Err(forbidden());
    }

    UserService::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
