use std::sync::Arc;

use chrono::Duration;
use governor::DefaultKeyedRateLimiter;
use gsms_auth::postgres::{PgCredentialProvider, PgProfileDirectory};
use gsms_auth::{CredentialProvider, CredentialStore, ProfileDirectory, SessionGate};
use gsms_cache::{CacheConfig, PageCache, RedisCache};
use gsms_config::{CorsConfig, RateLimitConfig, ServerConfig, SessionConfig};
use sqlx::PgPool;
use tracing::{info, warn};

pub type AuthRateLimiter = DefaultKeyedRateLimiter<String>;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Read-through cache for page data. `None` when `REDIS_URL` is unset.
    pub cache: Option<RedisCache>,
    /// Invalidated by the session gate on every session change.
    pub page_cache: Option<Arc<dyn PageCache>>,
    pub credentials: Arc<dyn CredentialProvider>,
    pub profiles: Arc<dyn ProfileDirectory>,
    pub session_config: SessionConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub auth_limiter: Arc<AuthRateLimiter>,
}

impl AppState {
    /// State with default configuration and no cache.
    pub fn new(
        db: PgPool,
        credentials: Arc<dyn CredentialProvider>,
        profiles: Arc<dyn ProfileDirectory>,
    ) -> Self {
        let rate_limit_config = RateLimitConfig::default();
        Self {
            db,
            cache: None,
            page_cache: None,
            credentials,
            profiles,
            session_config: SessionConfig::default(),
            cors_config: CorsConfig::default(),
            auth_limiter: Arc::new(AuthRateLimiter::keyed(rate_limit_config.auth_quota())),
            rate_limit_config,
        }
    }

    pub fn with_cache(mut self, cache: RedisCache) -> Self {
        self.page_cache = Some(Arc::new(cache.clone()));
        self.cache = Some(cache);
        self
    }

    pub fn with_page_cache(mut self, page_cache: Arc<dyn PageCache>) -> Self {
        self.page_cache = Some(page_cache);
        self
    }

    pub fn with_session_config(mut self, session_config: SessionConfig) -> Self {
        self.session_config = session_config;
        self
    }

    pub fn with_cors_config(mut self, cors_config: CorsConfig) -> Self {
        self.cors_config = cors_config;
        self
    }

    pub fn with_rate_limit_config(mut self, rate_limit_config: RateLimitConfig) -> Self {
        self.auth_limiter = Arc::new(AuthRateLimiter::keyed(rate_limit_config.auth_quota()));
        self.rate_limit_config = rate_limit_config;
        self
    }

    /// Session gate over a request-scoped credential store.
    pub fn gate<'a>(&'a self, store: &'a mut dyn CredentialStore) -> SessionGate<'a> {
        SessionGate::new(
            store,
            self.profiles.as_ref(),
            self.page_cache.as_deref(),
        )
    }
}

/// Builds the production state: Postgres-backed stores and, when
/// configured, the Redis page cache.
pub async fn init_app_state(server_config: &ServerConfig) -> anyhow::Result<AppState> {
    let db = gsms_db::init_db_pool().await?;

    if server_config.run_migrations {
        gsms_db::run_migrations(&db).await?;
    }

    let session_config = SessionConfig::from_env();
    let credentials = PgCredentialProvider::new(
        db.clone(),
        Duration::seconds(session_config.ttl_seconds),
    );
    let profiles = PgProfileDirectory::new(db.clone());

    let mut state = AppState::new(db, Arc::new(credentials), Arc::new(profiles))
        .with_session_config(session_config)
        .with_cors_config(CorsConfig::from_env())
        .with_rate_limit_config(RateLimitConfig::from_env());

    let cache_config = CacheConfig::from_env();
    match cache_config.connect().await {
        Ok(Some(cache)) => {
            info!(prefix = %cache_config.key_prefix, "Page cache enabled");
            state = state.with_cache(cache);
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Redis unavailable, page cache disabled"),
    }

    Ok(state)
}
