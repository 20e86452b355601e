//! # GSMS Core
//!
//! Foundational types shared by every GSMS crate:
//!
//! - [`errors`]: the HTTP-facing [`AppError`] and the `{"error": ...}` body shape
//! - [`password`]: bcrypt hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use gsms_core::errors::AppError;
//! use gsms_core::password::{hash_password, verify_password};
//!
//! let error = AppError::unauthorized(anyhow::anyhow!("Invalid login credentials"));
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorResponse};
pub use password::{hash_password, verify_password};
