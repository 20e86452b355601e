//! Session cookie configuration.

use std::env;

use crate::{env_flag, env_parse};

/// Settings for the cookie carrying the opaque session token.
///
/// # Environment Variables
///
/// - `SESSION_COOKIE_NAME`: cookie name (default: `gsms_session`)
/// - `SESSION_TTL_SECONDS`: session lifetime in seconds (default: `604800`, 7 days)
/// - `SESSION_COOKIE_SECURE`: set the `Secure` attribute (default: `false`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_seconds: i64,
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "gsms_session".to_string(),
            ttl_seconds: 604800,
            secure_cookie: false,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cookie_name: env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            ttl_seconds: env_parse("SESSION_TTL_SECONDS", defaults.ttl_seconds),
            secure_cookie: env_flag("SESSION_COOKIE_SECURE", defaults.secure_cookie),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_config() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "gsms_session");
        assert_eq!(config.ttl_seconds, 7 * 24 * 60 * 60);
        assert!(!config.secure_cookie);
    }
}
