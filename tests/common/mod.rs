#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, Response, header};
use gsms::router::init_router;
use gsms::state::AppState;
use gsms_auth::memory::{CountingPageCache, MemoryBackend};
use gsms_config::RateLimitConfig;
use gsms_models::{IdentityId, UserRole};
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

pub const COOKIE_NAME: &str = "gsms_session";
pub const PASSWORD: &str = "correct-horse";

/// App over the in-memory backend. The pool is lazy and never reached by
/// the session endpoints.
pub struct TestApp {
    pub router: Router,
    pub backend: MemoryBackend,
    pub page_cache: Arc<CountingPageCache>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_rate_limit(RateLimitConfig {
            auth_per_minute: 600,
            auth_burst_size: 100,
            ..RateLimitConfig::default()
        })
    }

    pub fn with_rate_limit(rate_limit_config: RateLimitConfig) -> Self {
        let backend = MemoryBackend::new();
        let page_cache = Arc::new(CountingPageCache::default());
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/gsms_test")
            .unwrap();

        let state = AppState::new(db, Arc::new(backend.clone()), Arc::new(backend.clone()))
            .with_page_cache(page_cache.clone())
            .with_rate_limit_config(rate_limit_config);

        Self {
            router: init_router(state),
            backend,
            page_cache,
        }
    }

    /// Identity with a profile, signed in with [`PASSWORD`].
    pub fn user(&self, email: &str, role: UserRole, full_name: &str) -> IdentityId {
        let id = self.backend.add_identity(email, PASSWORD);
        self.backend.add_profile(id, role, full_name);
        id
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Signs in and returns the session cookie value.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .send(form_post(
                "/api/auth/login",
                &format!("email={}&password={}", email, password),
                None,
            ))
            .await;
        session_cookie(&response).expect("login did not set a session cookie")
    }
}

pub fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, format!("{}={}", COOKIE_NAME, cookie));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Marks the request as arriving from `ip`, as `into_make_service_with_connect_info` does.
pub fn from_peer(mut request: Request<Body>, ip: [u8; 4]) -> Request<Body> {
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((ip, 40000))));
    request
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, format!("{}={}", COOKIE_NAME, cookie));
    }
    builder.body(Body::empty()).unwrap()
}

fn session_set_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{}=", COOKIE_NAME)))
        .map(str::to_string)
}

/// Value of a non-empty session cookie set by the response.
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    let header = session_set_cookie(response)?;
    let value = header
        .split(';')
        .next()?
        .trim_start_matches(&format!("{}=", COOKIE_NAME))
        .to_string();
    (!value.is_empty()).then_some(value)
}

/// Raw `Set-Cookie` header for the session cookie.
pub fn session_cookie_header<B>(response: &Response<B>) -> Option<String> {
    session_set_cookie(response)
}

/// True when the response removes the session cookie.
pub fn session_cookie_removed<B>(response: &Response<B>) -> bool {
    session_set_cookie(response).is_some_and(|header| {
        header.starts_with(&format!("{}=;", COOKIE_NAME)) && header.contains("Max-Age=0")
    })
}

pub fn location<B>(response: &Response<B>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
