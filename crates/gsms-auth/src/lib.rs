//! # GSMS Auth
//!
//! The session gate and the stores it sits on.
//!
//! - [`gate`]: [`SessionGate`], which signs callers in and out, checks the
//!   role a caller claims against the stored profile, and guards protected
//!   views
//! - [`store`]: the [`CredentialStore`], [`CredentialProvider`] and
//!   [`ProfileDirectory`] seams
//! - [`session`]: opaque session tokens
//! - [`postgres`]: the PostgreSQL-backed stores
//! - `memory`: in-memory stores for tests (`test-utils` feature)
//!
//! # Example
//!
//! ```ignore
//! use gsms_auth::{SessionGate, postgres::{PgCredentialProvider, PgProfileDirectory}};
//! use gsms_models::RoleClaim;
//!
//! let provider = PgCredentialProvider::new(pool.clone(), session_ttl);
//! let profiles = PgProfileDirectory::new(pool);
//!
//! let mut store = provider.scoped(None);
//! let mut gate = SessionGate::new(store.as_mut(), &profiles, None);
//! let navigation = gate
//!     .authenticate_with_role("ama@example.com", "secret", RoleClaim::Parent)
//!     .await?;
//! assert_eq!(navigation.path(), "/dashboard");
//! ```

pub mod error;
pub mod gate;
pub mod postgres;
pub mod session;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use error::{AuthError, StoreError};
pub use gate::{Navigation, SessionGate, SessionView};
pub use session::SessionToken;
pub use store::{
    CredentialProvider, CredentialStore, Identity, ProfileDirectory, SignUpMetadata,
};
