use axum::{Router, routing::get};

use super::controller::get_staff;
use crate::state::AppState;

pub fn init_staff_router() -> Router<AppState> {
    Router::new().route("/", get(get_staff))
}
