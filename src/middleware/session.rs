//! Session cookie handling and the protected-view guard.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gsms_auth::{SessionToken, SessionView};
use gsms_config::SessionConfig;

use crate::state::AppState;

/// Token carried by the request's session cookie, if any.
pub fn session_token(jar: &CookieJar, config: &SessionConfig) -> Option<SessionToken> {
    jar.get(&config.cookie_name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .map(SessionToken::from_raw)
}

// Browser-session cookie; the server-side row carries the expiry.
fn session_cookie(config: &SessionConfig, token: &SessionToken) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token.as_str().to_string()))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookie)
        .same_site(SameSite::Lax)
        .build()
}

/// Makes the response cookie match the store handle after an operation:
/// set when it holds a session, removed otherwise.
pub fn sync_session_cookie(
    jar: CookieJar,
    config: &SessionConfig,
    session: Option<&SessionToken>,
) -> CookieJar {
    match session {
        Some(token) => jar.add(session_cookie(config, token)),
        None => jar.remove(Cookie::build(config.cookie_name.clone()).path("/")),
    }
}

/// Extractor for protected views. Anonymous callers are redirected to `/`.
#[derive(Debug, Clone)]
pub struct RequireSession(pub SessionView);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let mut store = state
            .credentials
            .scoped(session_token(&jar, &state.session_config));

        state
            .gate(store.as_mut())
            .require_session()
            .await
            .map(RequireSession)
            .map_err(|navigation| Redirect::to(navigation.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    fn jar_with(cookie: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn test_session_token_read_from_named_cookie() {
        let config = SessionConfig::default();
        let jar = jar_with("theme=dark; gsms_session=abc123");

        let token = session_token(&jar, &config).unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn test_empty_cookie_is_no_session() {
        let config = SessionConfig::default();
        assert!(session_token(&jar_with("gsms_session="), &config).is_none());
        assert!(session_token(&jar_with("other=1"), &config).is_none());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let config = SessionConfig {
            secure_cookie: true,
            ..SessionConfig::default()
        };
        let cookie = session_cookie(&config, &SessionToken::from_raw("tok"));

        assert_eq!(cookie.name(), "gsms_session");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
