use axum::{Router, routing::post};

use super::controller::{login, login_with_role, logout, register};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/login/role", post(login_with_role))
        .route("/register", post(register))
}

/// Sign-out sits outside the rate limiter.
pub fn init_logout_router() -> Router<AppState> {
    Router::new().route("/logout", post(logout))
}
