use axum::Json;
use axum::extract::State;
use gsms_auth::SessionView;
use gsms_cache::keys::pages;
use gsms_core::AppError;
use gsms_models::{DashboardResponse, SessionResponse};
use tracing::instrument;

use crate::middleware::session::RequireSession;
use crate::page_cache::read_through;
use crate::state::AppState;

/// Current session
///
/// Profile attributes fall back to the email and the `staff` role when the
/// profile cannot be read (`profile_loaded: false`).
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Signed-in caller", body = SessionResponse),
        (status = 303, description = "No session, redirect to /")
    ),
    tag = "Session"
)]
#[instrument(skip(session), fields(identity_id = %session.identity.id))]
pub async fn get_session(RequireSession(session): RequireSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        identity_id: session.identity.id,
        profile_loaded: session.profile_loaded(),
        email: session.identity.email,
        display_name: session.display_name,
        role: session.role,
    })
}

/// Dashboard shell: header identity and role-specific navigation
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard shell", body = DashboardResponse),
        (status = 303, description = "No session, redirect to /")
    ),
    tag = "Session"
)]
#[instrument(skip(state, session), fields(identity_id = %session.identity.id))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
) -> Result<Json<DashboardResponse>, AppError> {
    let load = || async {
        Ok::<_, AppError>(DashboardResponse::new(
            session.display_name.clone(),
            session.role,
        ))
    };

    let cache = state.cache.as_ref();
    let dashboard = match dashboard_key(cache.map(|c| c.prefix()), &session) {
        Some(key) => read_through(cache, &key, load).await?,
        None => load().await?,
    };

    Ok(Json(dashboard))
}

/// Cache key for a session's dashboard. Views built from fallbacks are not
/// cached, so a recovered profile shows up on the next request.
fn dashboard_key(prefix: Option<&str>, session: &SessionView) -> Option<String> {
    if !session.profile_loaded() {
        return None;
    }
    prefix.map(|prefix| pages::dashboard(prefix, session.identity.id.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsms_auth::Identity;
    use gsms_models::{IdentityId, UserProfile, UserRole};

    fn view(profile_loaded: bool) -> SessionView {
        let identity = Identity {
            id: IdentityId::new(),
            email: "kofi@example.com".to_string(),
        };
        let profile = profile_loaded
            .then(|| UserProfile::new(identity.id, UserRole::Parent, "Kofi Boateng"));
        SessionView {
            display_name: "Kofi Boateng".to_string(),
            role: UserRole::Parent,
            identity,
            profile,
        }
    }

    #[test]
    fn test_dashboard_with_profile_is_cached_per_identity() {
        let session = view(true);
        assert_eq!(
            dashboard_key(Some("gsms"), &session),
            Some(format!("gsms:page:dashboard:{}", session.identity.id))
        );
    }

    #[test]
    fn test_fallback_dashboard_is_not_cached() {
        assert_eq!(dashboard_key(Some("gsms"), &view(false)), None);
    }

    #[test]
    fn test_no_cache_no_key() {
        assert_eq!(dashboard_key(None, &view(true)), None);
    }
}
