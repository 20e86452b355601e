use axum::Json;
use axum::extract::State;
use gsms_cache::keys::pages;
use gsms_core::AppError;
use gsms_models::StaffResponse;
use tracing::instrument;

use super::service::StaffService;
use crate::middleware::session::RequireSession;
use crate::page_cache::read_through;
use crate::state::AppState;

/// Latest staff members
///
/// Teaching and non-teaching staff alike.
#[utoipa::path(
    get,
    path = "/api/staff",
    responses(
        (status = 200, description = "Up to 50 staff members, newest first", body = StaffResponse),
        (status = 303, description = "No session, redirect to /"),
        (status = 500, description = "Internal server error", body = gsms_core::ErrorResponse)
    ),
    tag = "Records"
)]
#[instrument(skip(state, _session))]
pub async fn get_staff(
    State(state): State<AppState>,
    RequireSession(_session): RequireSession,
) -> Result<Json<StaffResponse>, AppError> {
    let cache = state.cache.as_ref();
    let key = cache.map(|c| pages::staff(c.prefix())).unwrap_or_default();

    let rows = read_through(cache, &key, || StaffService::list_recent(&state.db)).await?;

    Ok(Json(StaffResponse::from(rows)))
}
