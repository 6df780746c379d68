//! Activation integration tests
//!
//! - GET /v1/user/activate/{token}
//! - POST /v1/user/activate/resend

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use warden_auth::TokenPurpose;
use warden_email::EmailKind;

use crate::common::TestApp;

#[test_log::test(tokio::test)]
async fn test_activation_is_single_use() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;
    let token = app
        .email
        .get_activation_token_for("ada@example.com")
        .unwrap();

    let first = app
        .get(&format!("/v1/user/activate/{}", token), None)
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["msg"], "Successfully activated!");

    let me = app.get("/v1/user/me", Some(&fixture.token)).await;
    assert_eq!(me.body["is_activated"], true);

    let second = app
        .get(&format!("/v1/user/activate/{}", token), None)
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_activation_rejects_other_purposes() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    for purpose in [
        TokenPurpose::Session,
        TokenPurpose::PasswordReset,
        TokenPurpose::Invite,
    ] {
        let token = app.tokens.issue(&fixture.id, purpose).unwrap();
        let response = app
            .get(&format!("/v1/user/activate/{}", token), None)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", purpose);
    }

    let me = app.get("/v1/user/me", Some(&fixture.token)).await;
    assert_eq!(me.body["is_activated"], false);
}

#[tokio::test]
async fn test_activation_window() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let stale = app
        .tokens
        .issue_at(
            &fixture.id,
            TokenPurpose::Activation,
            Utc::now() - Duration::hours(24) - Duration::minutes(1),
        )
        .unwrap();
    let response = app
        .get(&format!("/v1/user/activate/{}", stale), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let fresh = app
        .tokens
        .issue_at(
            &fixture.id,
            TokenPurpose::Activation,
            Utc::now() - Duration::hours(23) - Duration::minutes(59),
        )
        .unwrap();
    let response = app
        .get(&format!("/v1/user/activate/{}", fresh), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_activation_signed_elsewhere() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let foreign = warden_auth::TokenAuthority::new(
        &warden_auth::AuthConfig::new("some-other-secret", None).unwrap(),
    );
    let token = foreign
        .issue(&fixture.id, TokenPurpose::Activation)
        .unwrap();

    let response = app
        .get(&format!("/v1/user/activate/{}", token), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_activation_for_unknown_account() {
    let app = TestApp::new();
    let token = app
        .tokens
        .issue(&uuid::Uuid::new_v4().to_string(), TokenPurpose::Activation)
        .unwrap();

    let response = app
        .get(&format!("/v1/user/activate/{}", token), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resend_activation() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app
        .request(
            Method::POST,
            "/v1/user/activate/resend",
            None,
            Some(&fixture.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let activation_emails = app
        .email
        .get_emails_for_recipient("ada@example.com")
        .into_iter()
        .filter(|e| e.is_kind(EmailKind::AccountActivation))
        .count();
    assert_eq!(activation_emails, 2);

    let token = app
        .email
        .get_activation_token_for("ada@example.com")
        .unwrap();
    let activated = app
        .get(&format!("/v1/user/activate/{}", token), None)
        .await;
    assert_eq!(activated.status, StatusCode::OK);

    let again = app
        .request(
            Method::POST,
            "/v1/user/activate/resend",
            None,
            Some(&fixture.token),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}
