//! Redis client for the page cache.
//!
//! Pages are stored as JSON strings with the configured TTL. A failed or
//! undecodable read counts as a miss.

use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Keys deleted per SCAN round during pattern invalidation.
const SCAN_BATCH: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    ttl: Duration,
    prefix: String,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("ttl", &self.ttl)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Opens a managed connection to `redis_url`.
    pub async fn new(
        redis_url: &str,
        ttl: Duration,
        prefix: impl Into<String>,
    ) -> Result<Self, CacheError> {
        let conn = ConnectionManager::new(Client::open(redis_url)?).await?;
        Ok(Self {
            conn,
            ttl,
            prefix: prefix.into(),
        })
    }

    /// Key prefix shared by every entry this client writes.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw: Option<String> = match self.conn.clone().get(key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(cache.key = %key, error = %e, "Page cache read failed");
                return None;
            }
        };

        let decoded = raw.and_then(|json| match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(cache.key = %key, error = %e, "Dropping undecodable cached page");
                None
            }
        });
        debug!(cache.key = %key, hit = decoded.is_some(), "Page cache lookup");
        decoded
    }

    #[instrument(skip(self, value))]
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let json = serde_json::to_string(value)?;
        self.conn
            .clone()
            .set_ex::<_, _, ()>(key, json, self.ttl.as_secs())
            .await?;
        Ok(())
    }

    /// Deletes every key matching the glob `pattern`. Returns the number deleted.
    #[instrument(skip(self))]
    pub async fn delete_matching(&self, pattern: &str) -> Result<u64, CacheError> {
        let mut conn = self.conn.clone();
        let mut cursor = 0u64;
        let mut deleted = 0u64;

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;

            if !batch.is_empty() {
                deleted += conn.del::<_, u64>(&batch).await?;
            }
            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!(cache.pattern = %pattern, deleted, "Pages deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageCache;
    use crate::keys::pages;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Listing {
        names: Vec<String>,
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_set_get_and_site_invalidation() {
        let cache = RedisCache::new("redis://localhost:6379", Duration::from_secs(60), "gsms-test")
            .await
            .unwrap();

        let listing = Listing {
            names: vec!["Yaw Boateng".to_string()],
        };
        let key = pages::students(cache.prefix());

        cache.set(&key, &listing).await.unwrap();
        assert_eq!(cache.get::<Listing>(&key).await, Some(listing));

        cache.invalidate_site().await.unwrap();
        assert_eq!(cache.get::<Listing>(&key).await, None);
    }
}
