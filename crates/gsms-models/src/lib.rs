//! # GSMS Models
//!
//! Domain models and DTOs for the GSMS API: the rows mirrored from the
//! database schema and the form/response shapes of the HTTP surface.
//!
//! # Modules
//!
//! - [`auth`]: sign-in, role-scoped sign-in and sign-up forms, session view
//! - [`dashboard`]: the dashboard shell and its role-specific navigation
//! - [`ids`]: strongly-typed identity and profile IDs
//! - [`profiles`]: the `user_profiles` row
//! - [`records`]: student, staff and parent listings
//! - [`roles`]: stored roles and caller role claims
//!
//! # Example
//!
//! ```ignore
//! use gsms_models::roles::{RoleClaim, UserRole};
//!
//! let claim: RoleClaim = "parent".parse()?;
//! assert!(claim.matches(UserRole::Parent));
//! assert!(!claim.matches(UserRole::Admin));
//! ```

pub mod auth;
pub mod dashboard;
pub mod ids;
pub mod profiles;
pub mod records;
pub mod roles;

pub use auth::{LoginForm, RegisterForm, RoleLoginForm, SessionResponse};
pub use dashboard::{DashboardResponse, NavItem};
pub use ids::{IdentityId, ProfileId};
pub use profiles::UserProfile;
pub use records::{
    ParentSummary, ParentsResponse, StaffResponse, StaffSummary, StudentSummary,
    StudentsResponse,
};
pub use roles::{RoleClaim, RoleParseError, UserRole};
