//! Profile endpoint integration tests
//!
//! - GET /v1/user/me
//! - PATCH /v1/user/me
//! - DELETE /v1/user/me

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{TestApp, TEST_PASSWORD};

#[tokio::test]
async fn test_get_profile() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app.get("/v1/user/me", Some(&fixture.token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], fixture.id.as_str());
    assert_eq!(response.body["name"], "Ada");
    assert!(response.body.get("password_hash").is_none());
    assert!(response.body.get("created_at").is_some());
}

#[tokio::test]
async fn test_update_allowed_fields() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app
        .request(
            Method::PATCH,
            "/v1/user/me",
            Some(json!({
                "name": "Ada King",
                "location": "London",
                "about": "First programmer"
            })),
            Some(&fixture.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["name"], "Ada King");
    assert_eq!(data["location"], "London");
    assert_eq!(data["about"], "First programmer");
    assert_eq!(data["email"], "ada@example.com");
}

#[tokio::test]
async fn test_update_with_disallowed_field_changes_nothing() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    for body in [
        json!({ "name": "Ada King", "is_activated": true }),
        json!({ "id": "00000000-0000-0000-0000-000000000000" }),
        json!({ "password_hash": "x" }),
    ] {
        let response = app
            .request(
                Method::PATCH,
                "/v1/user/me",
                Some(body.clone()),
                Some(&fixture.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(response.body["error"]["message"], "invalid update");
    }

    let me = app.get("/v1/user/me", Some(&fixture.token)).await;
    assert_eq!(me.body["name"], "Ada");
    assert_eq!(me.body["is_activated"], false);
}

#[tokio::test]
async fn test_update_invalid_value() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app
        .request(
            Method::PATCH,
            "/v1/user/me",
            Some(json!({ "website": "not a url" })),
            Some(&fixture.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_to_taken_email_conflicts() {
    let app = TestApp::new();
    app.register("Grace", "grace@example.com").await;
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app
        .request(
            Method::PATCH,
            "/v1/user/me",
            Some(json!({ "email": "grace@example.com" })),
            Some(&fixture.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_password_rehashes() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app
        .request(
            Method::PATCH,
            "/v1/user/me",
            Some(json!({ "password": "a-brand-new-password" })),
            Some(&fixture.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let old = app
        .post(
            "/v1/user/login",
            json!({ "email": "ada@example.com", "password": TEST_PASSWORD }),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app
        .post(
            "/v1/user/login",
            json!({ "email": "ada@example.com", "password": "a-brand-new-password" }),
            None,
        )
        .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_account() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app
        .request(Method::DELETE, "/v1/user/me", None, Some(&fixture.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], "user deletion successful");
    assert_eq!(response.body["user"]["id"], fixture.id.as_str());
    assert!(app.store.is_empty());

    // The session outlives the account but resolves to nobody
    let me = app.get("/v1/user/me", Some(&fixture.token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(me.error_code(), "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_null_clears_optional_profile_field() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app
        .request(
            Method::PATCH,
            "/v1/user/me",
            Some(json!({ "company": "Analytical Engines", "location": "London" })),
            Some(&fixture.token),
        )
        .await;
    assert_eq!(response.body["data"]["company"], "Analytical Engines");

    let response = app
        .request(
            Method::PATCH,
            "/v1/user/me",
            Some(json!({ "company": null })),
            Some(&fixture.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["company"].is_null());
    assert_eq!(response.body["data"]["location"], "London");

    let profile = app.get("/v1/user/me", Some(&fixture.token)).await;
    assert!(profile.body["company"].is_null());
}

#[tokio::test]
async fn test_null_rejected_for_required_profile_field() {
    let app = TestApp::new();
    let fixture = app.register("Ada", "ada@example.com").await;

    let response = app
        .request(
            Method::PATCH,
            "/v1/user/me",
            Some(json!({ "name": null })),
            Some(&fixture.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let profile = app.get("/v1/user/me", Some(&fixture.token)).await;
    assert_eq!(profile.body["name"], "Ada");
}
