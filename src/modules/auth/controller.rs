//! Form endpoints of the session gate.
//!
//! Each handler builds a credential store scoped to the request's cookie,
//! runs one gate operation and writes the resulting session state back to
//! the cookie, whatever the outcome.

use anyhow::anyhow;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use gsms_auth::AuthError;
use gsms_core::AppError;
use gsms_models::{LoginForm, RegisterForm, RoleLoginForm};
use gsms_observability::{
    track_role_mismatch, track_sign_in_failure, track_sign_in_success, track_sign_out,
    track_sign_up,
};
use tracing::instrument;

use crate::middleware::session::{session_token, sync_session_cookie};
use crate::state::AppState;
use crate::validator::ValidatedForm;

/// Maps a gate failure to a response. Credential errors use `credential_status`.
fn auth_failure(err: AuthError, credential_status: StatusCode) -> AppError {
    match err {
        AuthError::Credential(message) => AppError::new(credential_status, anyhow!(message)),
        AuthError::RoleMismatch => AppError::unauthorized(anyhow!(err.to_string())),
        AuthError::Infrastructure(_) => AppError::internal(anyhow!(err.to_string())),
    }
}

fn failure_reason(err: &AuthError) -> &'static str {
    match err {
        AuthError::Credential(_) => "invalid_credentials",
        AuthError::RoleMismatch => "role_mismatch",
        AuthError::Infrastructure(_) => "unavailable",
    }
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, redirect to /dashboard with the session cookie set"),
        (status = 401, description = "Rejected credentials", body = gsms_core::ErrorResponse),
        (status = 422, description = "Validation error", body = gsms_core::ErrorResponse),
        (status = 429, description = "Too many attempts", body = gsms_core::ErrorResponse),
        (status = 500, description = "Authentication service unavailable", body = gsms_core::ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> (CookieJar, Result<Redirect, AppError>) {
    let mut store = state
        .credentials
        .scoped(session_token(&jar, &state.session_config));

    let outcome = state
        .gate(store.as_mut())
        .authenticate(&form.email, &form.password)
        .await;

    let result = match outcome {
        Ok(navigation) => {
            track_sign_in_success("password");
            Ok(Redirect::to(navigation.path()))
        }
        Err(err) => {
            track_sign_in_failure(failure_reason(&err));
            Err(auth_failure(err, StatusCode::UNAUTHORIZED))
        }
    };

    let jar = sync_session_cookie(jar, &state.session_config, store.session());
    (jar, result)
}

/// Sign in as the role selected on the login page
///
/// When the stored role differs from `userType`, the session is revoked and
/// the cookie cleared.
#[utoipa::path(
    post,
    path = "/api/auth/login/role",
    request_body(content = RoleLoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, redirect to /dashboard with the session cookie set"),
        (status = 401, description = "Rejected credentials or role mismatch", body = gsms_core::ErrorResponse),
        (status = 400, description = "Malformed form or unknown user type", body = gsms_core::ErrorResponse),
        (status = 422, description = "Validation error", body = gsms_core::ErrorResponse),
        (status = 429, description = "Too many attempts", body = gsms_core::ErrorResponse),
        (status = 500, description = "Authentication service unavailable", body = gsms_core::ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, form), fields(email = %form.email, role = %form.user_type))]
pub async fn login_with_role(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<RoleLoginForm>,
) -> (CookieJar, Result<Redirect, AppError>) {
    let mut store = state
        .credentials
        .scoped(session_token(&jar, &state.session_config));

    let outcome = state
        .gate(store.as_mut())
        .authenticate_with_role(&form.email, &form.password, form.user_type)
        .await;

    let result = match outcome {
        Ok(navigation) => {
            track_sign_in_success("role");
            Ok(Redirect::to(navigation.path()))
        }
        Err(err) => {
            if matches!(err, AuthError::RoleMismatch) {
                track_role_mismatch(form.user_type.as_str());
            }
            track_sign_in_failure(failure_reason(&err));
            Err(auth_failure(err, StatusCode::UNAUTHORIZED))
        }
    };

    let jar = sync_session_cookie(jar, &state.session_config, store.session());
    (jar, result)
}

/// Create an account and sign in
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registered, redirect to /dashboard with the session cookie set"),
        (status = 400, description = "Rejected sign-up, e.g. email already registered", body = gsms_core::ErrorResponse),
        (status = 422, description = "Validation error", body = gsms_core::ErrorResponse),
        (status = 429, description = "Too many attempts", body = gsms_core::ErrorResponse),
        (status = 500, description = "Authentication service unavailable", body = gsms_core::ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, form), fields(email = %form.email, role = %form.user_type))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<RegisterForm>,
) -> (CookieJar, Result<Redirect, AppError>) {
    let mut store = state
        .credentials
        .scoped(session_token(&jar, &state.session_config));

    let outcome = state
        .gate(store.as_mut())
        .register(&form.email, &form.password, form.user_type, &form.full_name)
        .await;

    let result = match outcome {
        Ok(navigation) => {
            track_sign_up(form.user_type.as_str());
            Ok(Redirect::to(navigation.path()))
        }
        Err(err) => Err(auth_failure(err, StatusCode::BAD_REQUEST)),
    };

    let jar = sync_session_cookie(jar, &state.session_config, store.session());
    (jar, result)
}

/// Sign out
///
/// Always succeeds, with or without a session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 303, description = "Signed out, redirect to / with the session cookie removed")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let mut store = state
        .credentials
        .scoped(session_token(&jar, &state.session_config));

    let navigation = state.gate(store.as_mut()).deauthenticate().await;
    track_sign_out();

    let jar = sync_session_cookie(jar, &state.session_config, store.session());
    (jar, Redirect::to(navigation.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failure_uses_given_status() {
        let err = auth_failure(
            AuthError::Credential("User already registered".to_string()),
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "User already registered");
    }

    #[test]
    fn test_role_mismatch_is_unauthorized() {
        let err = auth_failure(AuthError::RoleMismatch, StatusCode::BAD_REQUEST);
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Invalid credentials for the selected user type");
    }

    #[test]
    fn test_infrastructure_hides_cause() {
        let err = auth_failure(
            AuthError::Infrastructure(anyhow!("connection refused")),
            StatusCode::UNAUTHORIZED,
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Authentication service unavailable");
    }
}
