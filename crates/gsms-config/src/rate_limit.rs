//! Rate limiting configuration for the sign-in endpoints.
//!
//! Sign-in, role-scoped sign-in and sign-up are throttled per client to
//! slow down password guessing. The limiter is a keyed GCRA bucket from the
//! `governor` crate:
//!
//! - `RATE_LIMIT_AUTH_PER_MINUTE`: tokens replenished per minute (default: 30)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket capacity (default: 5)
//! - `RATE_LIMIT_TRUST_FORWARDED_FOR`: key clients by the first
//!   `X-Forwarded-For` entry instead of the peer address (default: `false`).
//!   Enable only behind a reverse proxy that overwrites the header.
//!
//! Zero values are clamped to one.

use std::num::NonZeroU32;

use governor::Quota;

use crate::{env_flag, env_parse};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests replenished per minute for each client.
    pub auth_per_minute: u32,

    /// Requests a client may fire back to back before being throttled.
    pub auth_burst_size: u32,

    /// Whether `X-Forwarded-For` identifies the client.
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            auth_per_minute: 30,
            auth_burst_size: 5,
            trust_forwarded_for: false,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            auth_per_minute: env_parse("RATE_LIMIT_AUTH_PER_MINUTE", defaults.auth_per_minute),
            auth_burst_size: env_parse("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
            trust_forwarded_for: env_flag(
                "RATE_LIMIT_TRUST_FORWARDED_FOR",
                defaults.trust_forwarded_for,
            ),
        }
    }

    /// Quota for the auth endpoints.
    #[must_use]
    pub fn auth_quota(&self) -> Quota {
        let per_minute = NonZeroU32::new(self.auth_per_minute).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.auth_burst_size).unwrap_or(NonZeroU32::MIN);

        Quota::per_minute(per_minute).allow_burst(burst)
    }
}
