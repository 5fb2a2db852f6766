pub mod auth;
pub mod policy;

pub use auth::{Caller, authenticate};
pub use policy::{require_admin, require_tutor};
