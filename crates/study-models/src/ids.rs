//! Strongly-typed surrogate keys for domain entities.
//!
//! Every table uses a `BIGSERIAL` primary key. Each entity gets its own
//! newtype around `i64` so a `TutorId` can never be passed where a `UserId`
//! is expected, which matters here because a tutor is addressed both by its
//! own id and by its owning user's id.
//!
//! # Example
//!
//! ```ignore
//! use study_models::ids::{CourseId, TutorId};
//!
//! fn attach(course: CourseId, tutor: TutorId) { /* ... */ }
//!
//! attach(CourseId::from(1), TutorId::from(7));
//! // attach(TutorId::from(7), CourseId::from(1)); // Compile error
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use utoipa::ToSchema;

/// Defines an `i64` id newtype with serde, sqlx and OpenAPI support.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
        #[serde(transparent)]
        #[schema(value_type = i64, example = 1)]
        pub struct $name(pub i64);

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <i64 as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <i64 as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <i64 as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <i64 as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <i64 as PgHasArrayType>::array_type_info()
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                i64::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Key of a `users` row.
    UserId
);

define_id!(
    /// Key of a `tutors` row.
    TutorId
);

define_id!(
    /// Key of a `students` row.
    StudentId
);

define_id!(
    /// Key of a `subjects` row.
    SubjectId
);

define_id!(
    /// Key of a `courses` row.
    CourseId
);

define_id!(
    /// Key of a `study_groups` row.
    StudyGroupId
);

define_id!(
    /// Key of a `reports` row.
    ReportId
);

/// A reference to another entity inside a JSON payload.
///
/// Accepts both a bare id (`5`) and the nested object form (`{"id": 5}`)
/// that clients copy out of a read shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(T),
    Nested { id: T },
}

impl<T: Copy> Ref<T> {
    pub fn id(&self) -> T {
        match self {
            Ref::Id(id) | Ref::Nested { id } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&UserId(42)).unwrap(), "42");
        let parsed: CourseId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, CourseId(7));
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!("13".parse::<SubjectId>().unwrap(), SubjectId(13));
        assert!("abc".parse::<SubjectId>().is_err());
    }

    #[test]
    fn test_debug_names_the_entity() {
        assert_eq!(format!("{:?}", TutorId(3)), "TutorId(3)");
        assert_eq!(TutorId(3).to_string(), "3");
    }

    #[test]
    fn test_ref_accepts_bare_and_nested() {
        let bare: Ref<SubjectId> = serde_json::from_str("5").unwrap();
        let nested: Ref<SubjectId> = serde_json::from_str(r#"{"id": 5, "name": "Statistics"}"#)
            .unwrap();
        assert_eq!(bare.id(), SubjectId(5));
        assert_eq!(nested.id(), SubjectId(5));
    }

    #[test]
    fn test_ref_rejects_strings() {
        assert!(serde_json::from_str::<Ref<SubjectId>>(r#""5""#).is_err());
    }
}
