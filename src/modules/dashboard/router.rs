use axum::{Router, routing::get};

use super::controller::{get_dashboard, get_session};
use crate::state::AppState;

pub fn init_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/session", get(get_session))
        .route("/dashboard", get(get_dashboard))
}
