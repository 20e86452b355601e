use axum::Json;
use axum::extract::State;
use gsms_cache::keys::pages;
use gsms_core::AppError;
use gsms_models::ParentsResponse;
use tracing::instrument;

use super::service::ParentService;
use crate::middleware::session::RequireSession;
use crate::page_cache::read_through;
use crate::state::AppState;

/// Latest parents and guardians
#[utoipa::path(
    get,
    path = "/api/parents",
    responses(
        (status = 200, description = "Up to 50 parents, newest first", body = ParentsResponse),
        (status = 303, description = "No session, redirect to /"),
        (status = 500, description = "Internal server error", body = gsms_core::ErrorResponse)
    ),
    tag = "Records"
)]
#[instrument(skip(state, _session))]
pub async fn get_parents(
    State(state): State<AppState>,
    RequireSession(_session): RequireSession,
) -> Result<Json<ParentsResponse>, AppError> {
    let cache = state.cache.as_ref();
    let key = cache.map(|c| pages::parents(c.prefix())).unwrap_or_default();

    read_through(cache, &key, || ParentService::list_recent(&state.db))
        .await
        .map(|rows| Json(ParentsResponse::from(rows)))
}
