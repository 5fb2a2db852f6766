//! # Study Auth
//!
//! Authentication and authorization building blocks for the Study API.
//!
//! - [`identity`]: the authenticated caller resolved from a credential
//! - [`policy`]: per-role access predicates gating mutating requests
//! - [`token`]: opaque credential key generation and header parsing
//!
//! Nothing in here touches the database or the router; the HTTP layer
//! resolves an [`Identity`] and asks a [`Policy`] whether to let the request
//! through.
//!
//! # Example
//!
//! ```ignore
//! use axum::http::Method;
//! use study_auth::{Identity, Policy};
//!
//! let caller: Option<Identity> = resolve(&headers).await?;
//! if !Policy::IsAdmin.permits(caller.as_ref(), &Method::POST) {
//!     return Err(AppError::forbidden("...".into()));
//! }
//! ```

pub mod identity;
pub mod policy;
pub mod token;

pub use identity::Identity;
pub use policy::{Policy, can_grant_privileges, is_owner_or_staff, is_read_only};
pub use token::{KEY_LENGTH, generate_key, parse_authorization};
