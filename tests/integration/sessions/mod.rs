//! Session integration tests
//!
//! - POST /v1/user/login
//! - POST /v1/user/logout
//! - bearer handling on session-protected routes

use axum::http::{Method, StatusCode};
use serde_json::json;
use warden_auth::TokenPurpose;

use crate::common::{TestApp, TEST_PASSWORD};

#[tokio::test]
async fn test_login_issues_working_session() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app
        .post(
            "/v1/user/login",
            json!({ "email": "ada@example.com", "password": TEST_PASSWORD }),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["id"], fixture.id.as_str());

    let token = response.body["token"].as_str().unwrap();
    let me = app.get("/v1/user/me", Some(token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], "ada@example.com");
}

#[tokio::test]
async fn test_login_bad_credentials_look_the_same() {
    let app = TestApp::new();
    app.register("Ada", "ada@example.com").await;

    let wrong_password = app
        .post(
            "/v1/user/login",
            json!({ "email": "ada@example.com", "password": "not-the-password" }),
            None,
        )
        .await;
    let unknown_email = app
        .post(
            "/v1/user/login",
            json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }),
            None,
        )
        .await;

    for response in [&wrong_password, &unknown_email] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.error_code(), "INVALID_CREDENTIALS");
    }
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_logout() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app
        .request(Method::POST, "/v1/user/logout", None, Some(&fixture.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": "ok" }));
}

#[tokio::test]
async fn test_missing_and_malformed_authorization() {
    let app = TestApp::new();

    let missing = app.get("/v1/user/me", None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "MISSING_AUTHORIZATION");

    let garbage = app.get("/v1/user/me", Some("not.a.token")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.error_code(), "INVALID_TOKEN");
    assert_eq!(garbage.body["error"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_link_tokens_are_not_sessions() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    for purpose in [
        TokenPurpose::PasswordReset,
        TokenPurpose::Activation,
        TokenPurpose::Invite,
    ] {
        let token = app.tokens.issue(&fixture.id, purpose).unwrap();
        let response = app.get("/v1/user/me", Some(&token)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{}", purpose);
        assert_eq!(response.error_code(), "INVALID_TOKEN");
    }
}

#[tokio::test]
async fn test_expired_session_rejected() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let issued = chrono::Utc::now() - chrono::Duration::hours(4);
    let token = app
        .tokens
        .issue_at(&fixture.id, TokenPurpose::Session, issued)
        .unwrap();

    let response = app.get("/v1/user/me", Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_session_for_unknown_account() {
    let app = TestApp::new();
    let token = app
        .tokens
        .issue(&uuid::Uuid::new_v4().to_string(), TokenPurpose::Session)
        .unwrap();

    let response = app.get("/v1/user/me", Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "USER_NOT_FOUND");
}
