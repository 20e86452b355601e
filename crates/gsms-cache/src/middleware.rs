//! `Cache-Control` for session-scoped responses.
//!
//! Anything rendered for a particular session must never land in a shared
//! cache, and browsers must not replay it after sign-out.

use axum::http::{HeaderValue, header::CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

pub const PRIVATE_NO_STORE: &str = "private, no-store";

/// Layer stamping `Cache-Control: private, no-store` on every response.
pub fn private_no_store() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(CACHE_CONTROL, HeaderValue::from_static(PRIVATE_NO_STORE))
}
