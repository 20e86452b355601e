use axum::{Router, routing::get};

use super::controller::get_parents;
use crate::state::AppState;

pub fn init_parents_router() -> Router<AppState> {
    Router::new().route("/", get(get_parents))
}
