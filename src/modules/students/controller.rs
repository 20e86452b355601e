use axum::Json;
use axum::extract::State;
use gsms_cache::keys::pages;
use gsms_core::AppError;
use gsms_models::StudentsResponse;
use tracing::instrument;

use super::service::StudentService;
use crate::middleware::session::RequireSession;
use crate::page_cache::read_through;
use crate::state::AppState;

/// Latest students
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "Up to 50 students, newest first", body = StudentsResponse),
        (status = 303, description = "No session, redirect to /"),
        (status = 500, description = "Internal server error", body = gsms_core::ErrorResponse)
    ),
    tag = "Records"
)]
#[instrument(skip(state, _session))]
pub async fn get_students(
    State(state): State<AppState>,
    RequireSession(_session): RequireSession,
) -> Result<Json<StudentsResponse>, AppError> {
    let cache = state.cache.as_ref();
    let key = cache.map(|c| pages::students(c.prefix())).unwrap_or_default();

    let rows = read_through(cache, &key, || StudentService::list_recent(&state.db)).await?;

    Ok(Json(StudentsResponse::from(rows)))
}
