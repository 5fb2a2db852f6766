//! Tutor models.
//!
//! A tutor wraps exactly one user. Reads embed the user, writes reference
//! it by id.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{TutorId, UserId};
use crate::users::UserRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct Tutor {
    pub id: TutorId,
    pub user_id: UserId,
}

/// Read shape: `{user: {id, first_name, last_name}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TutorRead {
    pub user: UserRead,
}

/// Write shape: `{user: <user id>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TutorWrite {
    pub user: UserId,
}

impl From<&Tutor> for TutorWrite {
    fn from(tutor: &Tutor) -> Self {
        Self {
            user: tutor.user_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTutorDto {
    pub user: UserId,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTutorDto {
    pub user: Option<UserId>,
}

/// Tutor joined with its user, as loaded for read shapes.
#[derive(Debug, Clone, FromRow)]
pub struct TutorWithUser {
    pub id: TutorId,
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
}

impl From<TutorWithUser> for TutorRead {
    fn from(row: TutorWithUser) -> Self {
        Self {
            user: UserRead {
                id: row.user_id,
                first_name: row.first_name,
                last_name: row.last_name,
            },
        }
    }
}
