//! User domain models and DTOs.
//!
//! # Core Types
//!
//! - [`User`] - account row from the database
//! - [`UserRead`] - the public read shape, embedded by tutors and students
//! - [`Credential`] - the opaque auth token issued alongside every user
//!
//! # Request DTOs
//!
//! - [`CreateUserDto`] - registration / admin creation
//! - [`UpdateUserDto`] - partial update

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::UserId;

/// Account role. A user without a role is a plain account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Tutor,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Tutor => "tutor",
            Role::Student => "student",
        }
    }
}

/// A user row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<Role>,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

/// Read shape of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserRead {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserRead {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Opaque authentication credential, one per user.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Credential {
    pub key: String,
    pub user_id: UserId,
    pub created: DateTime<Utc>,
}

/// DTO for creating a user.
///
/// Anyone may register; `role` and `is_staff` are only honoured for admin or
/// staff callers.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 150))]
    pub username: Option<String>,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
    pub role: Option<Role>,
    pub is_staff: Option<bool>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

impl CreateUserDto {
    /// Whether the payload asks for anything only an administrator may grant.
    pub fn grants_privileges(&self) -> bool {
        self.role.is_some() || self.is_staff == Some(true)
    }
}

/// DTO for updating a user. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 150))]
    pub username: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "study_core::serde::double_option")]
    #[schema(value_type = Option<Role>)]
    pub role: Option<Option<Role>>,
    pub is_staff: Option<bool>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

impl UpdateUserDto {
    pub fn grants_privileges(&self) -> bool {
        self.role.is_some() || self.is_staff.is_some()
    }
}
