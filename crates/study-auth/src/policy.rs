//! Access predicates.
//!
//! Every predicate lets read-only requests through unconditionally; only
//! mutations are gated. Each is a pure function of the caller and the
//! request method (and, for ownership, the target user), so the HTTP layer
//! decides *when* to ask and these functions decide *what* the answer is.
//!
//! | Policy           | Mutation allowed for                 |
//! |------------------|--------------------------------------|
//! | `IsAdmin`        | callers with role `admin`            |
//! | `IsTutor`        | callers with role `tutor`            |
//! | `IsOwnerOrStaff` | the target user itself, or staff    |

use axum::http::Method;
use study_models::{Role, UserId};

use crate::identity::Identity;

/// GET, HEAD and OPTIONS never change state.
pub fn is_read_only(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Collection-level policy attached to a resource router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    IsAdmin,
    IsTutor,
}

impl Policy {
    pub fn permits(&self, caller: Option<&Identity>, method: &Method) -> bool {
        if is_read_only(method) {
            return true;
        }
        let required = match self {
            Policy::IsAdmin => Role::Admin,
            Policy::IsTutor => Role::Tutor,
        };
        caller.is_some_and(|identity| identity.has_role(required))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Policy::IsAdmin => "admin",
            Policy::IsTutor => "tutor",
        }
    }
}

/// Object-level check for endpoints whose target is a user account.
pub fn is_owner_or_staff(caller: Option<&Identity>, method: &Method, owner: UserId) -> bool {
    if is_read_only(method) {
        return true;
    }
    caller.is_some_and(|identity| identity.user_id == owner || identity.is_staff)
}

/// Only administrators and staff may hand out roles or staff status.
pub fn can_grant_privileges(caller: Option<&Identity>) -> bool {
    caller.is_some_and(|identity| identity.is_staff || identity.has_role(Role::Admin))
}
