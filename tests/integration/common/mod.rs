//! Common test utilities and fixtures for integration tests
//!
//! Every `TestApp` is a full router over the in-memory account store and
//! the capturing mock email service, so no external services are needed.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use warden_accounts::{AccountStore, InMemoryAccountStore};
use warden_auth::{AuthConfig, TokenAuthority};
use warden_common::{Config, LogFormat};
use warden_email::mock::MockEmailService;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_BASE_URL: &str = "http://warden.test";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub fn test_config() -> Config {
    Config {
        database_url: None,
        jwt_secret: TEST_SECRET.to_string(),
        jwt_issuer: None,
        app_base_url: TEST_BASE_URL.to_string(),
        rust_log: "warden=debug".to_string(),
        log_format: LogFormat::Pretty,
        port: 0,
    }
}

/// Test application with handles on its store and outbox
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryAccountStore>,
    pub email: MockEmailService,
    /// Authority sharing the server's secret, for crafting tokens directly
    pub tokens: TokenAuthority,
}

/// Decoded response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }
}

/// A registered account and its session token
pub struct UserFixture {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryAccountStore::new());
        let email = MockEmailService::new().with_app_base_url(TEST_BASE_URL);

        let state = warden_app::build_state(
            &test_config(),
            store.clone() as Arc<dyn AccountStore>,
            Arc::new(email.clone()),
        )
        .unwrap();

        let tokens = TokenAuthority::new(&AuthConfig::new(TEST_SECRET, None).unwrap());

        Self {
            router: warden_app::create_app(state),
            store,
            email,
            tokens,
        }
    }

    /// Send one request through a clone of the router
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, None, token).await
    }

    pub async fn post(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.request(Method::POST, uri, Some(body), token).await
    }

    /// Register an account through the API
    pub async fn register(&self, name: &str, email: &str) -> UserFixture {
        let response = self
            .post(
                "/v1/user",
                json!({ "name": name, "email": email, "password": TEST_PASSWORD }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        UserFixture {
            id: response.body["user"]["id"].as_str().unwrap().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            token: response.body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Path of a link, stripped of the test base URL
    pub fn path_of(link: &str) -> &str {
        link.strip_prefix(TEST_BASE_URL).unwrap_or(link)
    }
}
