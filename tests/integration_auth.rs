mod common;

use axum::http::StatusCode;
use common::{
    PASSWORD, TestApp, body_json, form_post, location, session_cookie, session_cookie_header,
    session_cookie_removed,
};
use gsms_models::UserRole;

#[tokio::test]
async fn test_login_success_sets_cookie_and_redirects() {
    let app = TestApp::new();
    app.user("ama@example.com", UserRole::Student, "Ama Owusu");

    let response = app
        .send(form_post(
            "/api/auth/login",
            &format!("email=ama@example.com&password={}", PASSWORD),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard"));

    let header = session_cookie_header(&response).unwrap();
    assert!(header.contains("HttpOnly"));
    assert!(header.contains("SameSite=Lax"));
    assert!(header.contains("Path=/"));
    assert!(session_cookie(&response).is_some());

    assert_eq!(app.backend.session_count(), 1);
    assert_eq!(app.page_cache.invalidations(), 1);
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::new();
    app.user("kofi@example.com", UserRole::Staff, "Kofi Boateng");

    let response = app
        .send(form_post(
            "/api/auth/login",
            &format!("email=Kofi@Example.com&password={}", PASSWORD),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.user("ama@example.com", UserRole::Student, "Ama Owusu");

    let response = app
        .send(form_post(
            "/api/auth/login",
            "email=ama@example.com&password=wrong-password",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
    assert_eq!(app.page_cache.invalidations(), 0);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid login credentials");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new();

    let response = app
        .send(form_post(
            "/api/auth/login",
            "email=nobody@example.com&password=whatever",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid login credentials");
}

#[tokio::test]
async fn test_login_invalid_email_is_unprocessable() {
    let app = TestApp::new();

    let response = app
        .send(form_post(
            "/api/auth/login",
            "email=not-an-email&password=whatever",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "A valid email address is required");
}

#[tokio::test]
async fn test_login_missing_field() {
    let app = TestApp::new();

    let response = app
        .send(form_post("/api/auth/login", "email=ama@example.com", None))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "password is required");
}

#[tokio::test]
async fn test_login_store_unavailable_is_server_error() {
    let app = TestApp::new();
    app.user("ama@example.com", UserRole::Student, "Ama Owusu");
    app.backend.set_unavailable(true);

    let response = app
        .send(form_post(
            "/api/auth/login",
            &format!("email=ama@example.com&password={}", PASSWORD),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Authentication service unavailable");
}

#[tokio::test]
async fn test_role_login_matching_role() {
    let app = TestApp::new();
    app.user("yaw@example.com", UserRole::Parent, "Yaw Asante");

    let response = app
        .send(form_post(
            "/api/auth/login/role",
            &format!("email=yaw@example.com&password={}&userType=parent", PASSWORD),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard"));
    assert!(session_cookie(&response).is_some());
    assert_eq!(app.backend.session_count(), 1);
}

#[tokio::test]
async fn test_role_login_mismatch_revokes_session() {
    let app = TestApp::new();
    app.user("yaw@example.com", UserRole::Parent, "Yaw Asante");

    let response = app
        .send(form_post(
            "/api/auth/login/role",
            &format!("email=yaw@example.com&password={}&userType=staff", PASSWORD),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
    assert_eq!(app.backend.session_count(), 0);
    assert_eq!(app.page_cache.invalidations(), 0);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials for the selected user type");
}

#[tokio::test]
async fn test_role_mismatch_clears_existing_cookie() {
    let app = TestApp::new();
    app.user("esi@example.com", UserRole::Student, "Esi Mensah");
    let cookie = app.login("esi@example.com", PASSWORD).await;

    let response = app
        .send(form_post(
            "/api/auth/login/role",
            &format!("email=esi@example.com&password={}&userType=parent", PASSWORD),
            Some(&cookie),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie_removed(&response));
    assert_eq!(app.backend.session_count(), 0);
}

#[tokio::test]
async fn test_role_login_admin_cannot_be_claimed() {
    let app = TestApp::new();
    app.user("admin@example.com", UserRole::Admin, "Head Teacher");

    let claimed = app
        .send(form_post(
            "/api/auth/login/role",
            &format!("email=admin@example.com&password={}&userType=admin", PASSWORD),
            None,
        ))
        .await;
    assert_eq!(claimed.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(claimed).await["error"], "Invalid user type");

    let as_staff = app
        .send(form_post(
            "/api/auth/login/role",
            &format!("email=admin@example.com&password={}&userType=staff", PASSWORD),
            None,
        ))
        .await;
    assert_eq!(as_staff.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.backend.session_count(), 0);
}

#[tokio::test]
async fn test_role_login_bad_password_keeps_store_message() {
    let app = TestApp::new();
    app.user("yaw@example.com", UserRole::Parent, "Yaw Asante");

    let response = app
        .send(form_post(
            "/api/auth/login/role",
            "email=yaw@example.com&password=nope&userType=parent",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid login credentials");
}

#[tokio::test]
async fn test_register_creates_profile_and_signs_in() {
    let app = TestApp::new();

    let response = app
        .send(form_post(
            "/api/auth/register",
            "email=abena@example.com&password=secret123&userType=staff&fullName=Abena+Darko",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard"));
    let cookie = session_cookie(&response).unwrap();

    let session = app.send(common::get("/api/session", Some(&cookie))).await;
    assert_eq!(session.status(), StatusCode::OK);
    let body = body_json(session).await;
    assert_eq!(body["display_name"], "Abena Darko");
    assert_eq!(body["role"], "staff");
    assert_eq!(body["profile_loaded"], true);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    app.user("abena@example.com", UserRole::Staff, "Abena Darko");

    let response = app
        .send(form_post(
            "/api/auth/register",
            "email=abena@example.com&password=secret123&userType=staff&fullName=Abena+Darko",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "User already registered");
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::new();

    let response = app
        .send(form_post(
            "/api/auth/register",
            "email=abena@example.com&password=abc&userType=student&fullName=Abena",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Password should be at least 6 characters");
    assert_eq!(app.backend.session_count(), 0);
}

#[tokio::test]
async fn test_register_rejects_admin_claim() {
    let app = TestApp::new();

    let response = app
        .send(form_post(
            "/api/auth/register",
            "email=abena@example.com&password=secret123&userType=admin&fullName=Abena",
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid user type");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new();
    app.user("ama@example.com", UserRole::Student, "Ama Owusu");
    let cookie = app.login("ama@example.com", PASSWORD).await;

    let response = app
        .send(form_post("/api/auth/logout", "", Some(&cookie)))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    assert!(session_cookie_removed(&response));
    assert_eq!(app.backend.session_count(), 0);

    let session = app.send(common::get("/api/session", Some(&cookie))).await;
    assert_eq!(session.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&session), Some("/"));
}

#[tokio::test]
async fn test_logout_twice_is_harmless() {
    let app = TestApp::new();
    app.user("ama@example.com", UserRole::Student, "Ama Owusu");
    let cookie = app.login("ama@example.com", PASSWORD).await;

    for _ in 0..2 {
        let response = app
            .send(form_post("/api/auth/logout", "", Some(&cookie)))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/"));
    }

    let anonymous = app.send(form_post("/api/auth/logout", "", None)).await;
    assert_eq!(anonymous.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&anonymous), Some("/"));
}

#[tokio::test]
async fn test_logout_survives_store_failure() {
    let app = TestApp::new();
    app.user("ama@example.com", UserRole::Student, "Ama Owusu");
    let cookie = app.login("ama@example.com", PASSWORD).await;
    app.backend.fail_sign_out(true);

    let response = app
        .send(form_post("/api/auth/logout", "", Some(&cookie)))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    assert!(session_cookie_removed(&response));
}

#[tokio::test]
async fn test_login_replaces_previous_session() {
    let app = TestApp::new();
    app.user("ama@example.com", UserRole::Student, "Ama Owusu");
    let first = app.login("ama@example.com", PASSWORD).await;

    let response = app
        .send(form_post(
            "/api/auth/login",
            &format!("email=ama@example.com&password={}", PASSWORD),
            Some(&first),
        ))
        .await;
    let second = session_cookie(&response).unwrap();

    assert_ne!(first, second);
    assert_eq!(app.backend.session_count(), 1);
}
