//! Per-client throttling of the auth endpoints.

use std::net::SocketAddr;

use anyhow::anyhow;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::clock::{Clock, DefaultClock};
use gsms_core::AppError;
use tracing::warn;

use crate::state::AppState;

fn forwarded_for(req: &Request) -> Option<String> {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}

/// Client key: the peer address, or the first `x-forwarded-for` entry when
/// the proxy in front is trusted to set it.
pub fn client_key(req: &Request, trust_forwarded_for: bool) -> String {
    let forwarded = trust_forwarded_for.then(|| forwarded_for(req)).flatten();

    forwarded
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn auth_rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let key = client_key(&req, state.rate_limit_config.trust_forwarded_for);

    match state.auth_limiter.check_key(&key) {
        Ok(()) => next.run(req).await,
        Err(not_until) => {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            warn!(client = %key, retry_after_secs = wait.as_secs(), "Auth rate limit exceeded");

            let mut response =
                AppError::too_many_requests(anyhow!("Too many requests, please try again later"))
                    .into_response();
            let retry_after = wait.as_secs().max(1).to_string();
            if let Ok(value) = HeaderValue::from_str(&retry_after) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn from_peer(forwarded: Option<&str>) -> Request {
        let mut builder = Request::builder();
        if let Some(forwarded) = forwarded {
            builder = builder.header("x-forwarded-for", forwarded);
        }
        let mut req = builder.body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 5000))));
        req
    }

    #[test]
    fn test_client_key_ignores_untrusted_forwarded_for() {
        let req = from_peer(Some("203.0.113.7, 10.0.0.1"));
        assert_eq!(client_key(&req, false), "192.168.1.20");
    }

    #[test]
    fn test_client_key_uses_trusted_forwarded_for() {
        let req = from_peer(Some("203.0.113.7, 10.0.0.1"));
        assert_eq!(client_key(&req, true), "203.0.113.7");
    }

    #[test]
    fn test_trusted_key_falls_back_to_peer() {
        let req = from_peer(None);
        assert_eq!(client_key(&req, true), "192.168.1.20");
    }

    #[test]
    fn test_client_key_unknown() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_key(&req, false), "unknown");
    }
}
