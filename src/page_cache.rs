//! Read-through caching of page data.

use std::future::Future;

use gsms_cache::RedisCache;
use gsms_core::AppError;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

/// Returns the cached value under `key`, or loads, stores and returns it.
///
/// Without a cache this is just `load`. Failing to store is logged, not
/// returned.
pub async fn read_through<T, F, Fut>(
    cache: Option<&RedisCache>,
    key: &str,
    load: F,
) -> Result<T, AppError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let Some(cache) = cache else {
        return load().await;
    };

    if let Some(cached) = cache.get::<T>(key).await {
        return Ok(cached);
    }

    let value = load().await?;

    if let Err(e) = cache.set(key, &value).await {
        warn!(cache.key = %key, error = %e, "Failed to cache page data");
    }

    Ok(value)
}
