//! Background upkeep: expired sessions and idle rate-limit buckets.

use std::time::Duration;

use gsms_auth::postgres::purge_expired_sessions;
use tracing::{debug, info, warn};

use crate::state::{AppState, AuthRateLimiter};

pub const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);
pub const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Spawns the periodic purge of expired sessions and pruning of the auth
/// rate limiter. Must be called inside a tokio runtime.
pub fn spawn_housekeeping(state: &AppState) {
    let db = state.db.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            match purge_expired_sessions(&db).await {
                Ok(0) => {}
                Ok(purged) => info!(purged, "Expired sessions purged"),
                Err(e) => warn!(error = %e, "Failed to purge expired sessions"),
            }
        }
    });

    let limiter = state.auth_limiter.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(LIMITER_PRUNE_INTERVAL);
        loop {
            ticker.tick().await;
            let tracked = prune_limiter(&limiter);
            debug!(tracked, "Auth rate limiter pruned");
        }
    });
}

/// Forgets clients whose bucket has refilled. Returns the clients still tracked.
pub fn prune_limiter(limiter: &AuthRateLimiter) -> usize {
    limiter.retain_recent();
    limiter.shrink_to_fit();
    limiter.len()
}
