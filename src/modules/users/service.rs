use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use study_auth::generate_key;
use study_core::{AppError, hash_password};
use study_models::{CreateUserDto, Credential, UpdateUserDto, User, UserId};

const USER_COLUMNS: &str = "id, username, first_name, last_name, role, is_staff, date_joined";

pub struct UserService;

impl UserService {
    /// Creates a user together with its credential in one transaction.
    #[instrument(skip(db, dto))]
    pub async fn create_user(
        db: &PgPool,
        dto: CreateUserDto,
    ) -> Result<(User, Credential), AppError> {
        let password_hash = dto.password.as_deref().map(hash_password).transpose()?;

        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (username, first_name, last_name, role, is_staff, password)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(&dto.username)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(dto.role)
        .bind(dto.is_staff.unwrap_or(false))
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_write(e, "User"))?;

        let credential = sqlx::query_as::<_, Credential>(
            r#"INSERT INTO auth_tokens (key, user_id)
               VALUES ($1, $2)
               RETURNING key, user_id, created"#,
        )
        .bind(generate_key())
        .bind(user.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((user, credential))
    }

    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
                .fetch_all(db)
                .await?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: UserId) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_user(
        db: &PgPool,
        id: UserId,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let password_hash = dto.password.as_deref().map(hash_password).transpose()?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"UPDATE users
               SET username = COALESCE($2, username),
                   first_name = COALESCE($3, first_name),
                   last_name = COALESCE($4, last_name),
                   role = CASE WHEN $5 THEN $6 ELSE role END,
                   is_staff = COALESCE($7, is_staff),
                   password = COALESCE($8, password)
               WHERE id = $1
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(id)
        .bind(dto.username)
        .bind(dto.first_name)
        .bind(dto.last_name)
        .bind(dto.role.is_some())
        .bind(dto.role.flatten())
        .bind(dto.is_staff)
        .bind(password_hash)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::from_write(e, "User"))?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        Ok(user)
    }

    /// Deletes the user; its tutor, student and credential go with it.
    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: UserId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        Ok(())
    }
}
