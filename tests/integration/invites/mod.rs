//! Invite integration tests
//!
//! - GET /v1/user/invite
//! - POST /v1/user/invite
//! - GET /v1/user/invite/{token}

use axum::http::{Method, StatusCode};
use serde_json::json;
use warden_auth::TokenPurpose;

use crate::common::{TestApp, TEST_BASE_URL};

fn token_of(link: &str) -> &str {
    link.rsplit('/').next().unwrap()
}

#[tokio::test]
async fn test_invite_link_round_trip() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app.get("/v1/user/invite", Some(&fixture.token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let link = response.body["inviteLink"].as_str().unwrap();
    assert!(link.starts_with(&format!("{}/v1/user/invite/", TEST_BASE_URL)));

    let claim = app
        .tokens
        .verify(token_of(link), TokenPurpose::Invite)
        .unwrap();
    assert_eq!(claim.sub, fixture.id);

    let processed = app.get(TestApp::path_of(link), None).await;
    assert_eq!(processed.status, StatusCode::OK);
    assert_eq!(
        processed.body,
        json!({ "success": true, "msg": "Redirect user to register in client side!" })
    );
}

#[tokio::test]
async fn test_send_invite_emails_link() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app
        .post(
            "/v1/user/invite",
            json!({ "email": "friend@example.com" }),
            Some(&fixture.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sent"], true);

    let emailed = app
        .email
        .get_invite_link_for("friend@example.com")
        .expect("invite email captured");
    assert_eq!(response.body["inviteLink"], emailed.as_str());

    let processed = app.get(TestApp::path_of(&emailed), None).await;
    assert_eq!(processed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_send_invite_requires_valid_email() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app
        .post(
            "/v1/user/invite",
            json!({ "email": "not-an-email" }),
            Some(&fixture.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.email.get_invite_link_for("not-an-email").is_none());
}

#[tokio::test]
async fn test_invite_requires_session() {
    let app = TestApp::new();

    let response = app.get("/v1/user/invite", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invite_token_cannot_activate() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app.get("/v1/user/invite", Some(&fixture.token)).await;
    let link = response.body["inviteLink"].as_str().unwrap();

    let activation = app
        .get(&format!("/v1/user/activate/{}", token_of(link)), None)
        .await;
    assert_eq!(activation.status, StatusCode::BAD_REQUEST);
    assert_eq!(activation.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_invite_from_deleted_account() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app.get("/v1/user/invite", Some(&fixture.token)).await;
    let link = response.body["inviteLink"].as_str().unwrap().to_string();

    app.request(Method::DELETE, "/v1/user/me", None, Some(&fixture.token))
        .await;

    let processed = app.get(TestApp::path_of(&link), None).await;
    assert_eq!(processed.status, StatusCode::BAD_REQUEST);
    assert_eq!(processed.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_tampered_invite_rejected() {
    let app = TestApp::new();

    let response = app.get("/v1/user/invite/not-a-token", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}
