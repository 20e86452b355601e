//! # GSMS Config
//!
//! Configuration types for the GSMS API, each loaded from environment
//! variables with development defaults:
//!
//! - [`cors`]: allowed browser origins
//! - [`rate_limit`]: throttling for the sign-in endpoints
//! - [`server`]: listen address and startup switches
//! - [`session`]: session cookie name, lifetime and flags
//!
//! # Example
//!
//! ```ignore
//! use gsms_config::{CorsConfig, RateLimitConfig, ServerConfig, SessionConfig};
//!
//! let session_config = SessionConfig::from_env();
//! let rate_limit_config = RateLimitConfig::from_env();
//! ```

pub mod cors;
pub mod rate_limit;
pub mod server;
pub mod session;

pub use cors::CorsConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;

/// Reads a boolean flag, accepting `true`/`1` (case-insensitive).
pub(crate) fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}

/// Reads and parses a variable, falling back when unset or unparsable.
pub(crate) fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
