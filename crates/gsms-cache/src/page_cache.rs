//! Site-wide invalidation of cached page data.

use async_trait::async_trait;

use crate::keys::pages;
use crate::redis::{CacheError, RedisCache};

/// Anything holding page data that depends on session identity.
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Drops every cached page. Returns the number of entries removed.
    async fn invalidate_site(&self) -> Result<u64, CacheError>;
}

#[async_trait]
impl PageCache for RedisCache {
    async fn invalidate_site(&self) -> Result<u64, CacheError> {
        self.delete_matching(&pages::site_pattern(self.prefix()))
            .await
    }
}
