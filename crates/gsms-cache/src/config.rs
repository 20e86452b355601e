//! Redis cache configuration.

use std::env;
use std::time::Duration;

use crate::redis::{CacheError, RedisCache};

/// Redis cache configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `REDIS_URL`: Redis connection URL. Caching is disabled when unset.
/// - `CACHE_TTL_SECONDS`: TTL for cached pages in seconds (default: `300`)
/// - `CACHE_PREFIX`: Prefix for all cache keys (default: `gsms`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub redis_url: Option<String>,
    pub default_ttl_seconds: u64,
    pub key_prefix: String,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
            default_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            key_prefix: env::var("CACHE_PREFIX").unwrap_or_else(|_| "gsms".into()),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }

    pub fn is_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Connects when a URL is configured. `Ok(None)` means caching is off.
    pub async fn connect(&self) -> Result<Option<RedisCache>, CacheError> {
        let Some(url) = &self.redis_url else {
            return Ok(None);
        };
        RedisCache::new(url, self.default_ttl(), self.key_prefix.clone())
            .await
            .map(Some)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            default_ttl_seconds: 300,
            key_prefix: "gsms".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled() {
        let config = CacheConfig::default();
        assert!(!config.is_enabled());
        assert_eq!(config.default_ttl(), Duration::from_secs(300));
        assert_eq!(config.key_prefix, "gsms");
    }

    #[tokio::test]
    async fn test_connect_without_url_is_disabled() {
        let cache = CacheConfig::default().connect().await.unwrap();
        assert!(cache.is_none());
    }
}
