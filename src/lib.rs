//! # GSMS API
//!
//! Backend of the Ghana School Management System: sign-in and sign-up for
//! students, staff and parents, and the dashboard views over school records.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Session guard extractor, rate limiting, cookies
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Sign-in, role-scoped sign-in, sign-up, sign-out
//! │   ├── dashboard/   # Session view and dashboard shell
//! │   ├── students/    # Student listing
//! │   ├── staff/       # Staff listing
//! │   └── parents/     # Parent listing
//! ├── housekeeping.rs   # Session purge and limiter pruning
//! └── page_cache.rs     # Read-through caching of page data
//! ```
//!
//! Each feature module is split into `controller.rs` (handlers),
//! `service.rs` (queries) and `router.rs`.
//!
//! ## Sessions
//!
//! Every session change goes through [`gsms_auth::SessionGate`]. A signed-in
//! client holds an opaque token in an HTTP-only cookie; the server keeps
//! only its digest. Successful sign-in or sign-up answers `303 See Other`
//! to `/dashboard`, sign-out to `/`. Failures answer `{"error": "..."}`.
//!
//! Signing in for a role (`/api/auth/login/role`) additionally checks the
//! stored profile. A caller whose profile has another role is signed out
//! again and told `Invalid credentials for the selected user type`.
//!
//! Protected views use the [`middleware::session::RequireSession`]
//! extractor, which redirects anonymous callers to `/`.
//!
//! ## Creating an admin
//!
//! Admin is not a role callers can claim. Admins are created from the CLI:
//!
//! ```bash
//! cargo run --bin gsms-cli -- create-admin
//! ```
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod housekeeping;
pub mod middleware;
pub mod modules;
pub mod page_cache;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use gsms_auth;
pub use gsms_cache;
pub use gsms_config;
pub use gsms_core;
pub use gsms_models;
