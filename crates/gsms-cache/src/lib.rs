//! # GSMS Cache
//!
//! Redis-backed cache for server-rendered page data.
//!
//! Everything a page renders from (the dashboard shell of one identity, the
//! record listings) is cached under the `<prefix>:page:` namespace. Any
//! change of session state invalidates the whole namespace through
//! [`PageCache::invalidate_site`], so the next render reflects the new
//! session.
//!
//! This crate provides:
//! - Redis connection management ([`RedisCache`])
//! - Cache configuration from environment variables ([`CacheConfig`])
//! - Page cache keys ([`keys`])
//! - The [`PageCache`] invalidation seam used by the session gate
//! - `Cache-Control` headers for session-scoped responses ([`middleware`])
//!
//! # Example
//!
//! ```ignore
//! use gsms_cache::{CacheConfig, RedisCache, PageCache, keys};
//!
//! let config = CacheConfig::from_env();
//! if let Some(url) = &config.redis_url {
//!     let cache = RedisCache::new(url, config.default_ttl(), &config.key_prefix).await?;
//!
//!     cache.set(&keys::pages::students(cache.prefix()), &listing).await?;
//!     cache.invalidate_site().await?;
//! }
//! ```

pub mod config;
pub mod keys;
pub mod middleware;
pub mod page_cache;
pub mod redis;

pub use config::CacheConfig;
pub use middleware::private_no_store;
pub use page_cache::PageCache;
pub use redis::{CacheError, RedisCache};
