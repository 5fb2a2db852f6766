//! # Study Core
//!
//! Core types, errors, and utilities shared by every Study crate.
//!
//! - [`errors`]: application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: wire-format helpers (timestamps, double options)
//!
//! # Example
//!
//! ```ignore
//! use study_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//! let reference = AppError::message("Tutor does not exist");
//! ```

pub mod errors;
pub mod password;
pub mod serde;

pub use errors::{AppError, ErrorResponse};
pub use password::{hash_password, verify_password};
