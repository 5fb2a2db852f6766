//! Account administration used by the `create-admin` and `issue-token`
//! commands.

use sqlx::PgPool;
use study_auth::generate_key;
use study_core::hash_password;
use study_models::{Role, UserId};

/// Creates an administrator with staff rights together with its credential.
/// Returns the new user id and the credential key.
pub async fn create_admin(
    db: &PgPool,
    username: &str,
    first_name: &str,
    last_name: &str,
    password: &str,
) -> Result<(UserId, String), Box<dyn std::error::Error>> {
    let password_hash = hash_password(password).map_err(|e| e.error)?;

    let mut tx = db.begin().await?;

    let taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&mut *tx)
            .await?;
    if taken {
        return Err(format!("username '{}' is already taken", username).into());
    }

    let user_id: UserId = sqlx::query_scalar(
        r#"INSERT INTO users (username, first_name, last_name, role, is_staff, password)
        VALUES ($1, $2, $3, $4, TRUE, $5)
        RETURNING id"#,
    )
    .bind(username)
    .bind(first_name)
    .bind(last_name)
    .bind(Role::Admin)
    .bind(&password_hash)
    .fetch_one(&mut *tx)
    .await?;

    let key: String =
        sqlx::query_scalar("INSERT INTO auth_tokens (key, user_id) VALUES ($1, $2) RETURNING key")
            .bind(generate_key())
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

    tx.commit().await?;

    Ok((user_id, key))
}

/// Returns the credential key of the user with the given username.
///
/// Accounts created before credentials were issued get one on first request.
pub async fn issue_token(
    db: &PgPool,
    username: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let user_id: Option<UserId> = sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(db)
        .await?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    sqlx::query("INSERT INTO auth_tokens (key, user_id) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING")
        .bind(generate_key())
        .bind(user_id)
        .execute(db)
        .await?;

    let key: String = sqlx::query_scalar("SELECT key FROM auth_tokens WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(db)
        .await?;

    Ok(Some(key))
}
