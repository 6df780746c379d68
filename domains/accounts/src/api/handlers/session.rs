//! Session handlers
//!
//! Implements:
//! - POST /v1/user/login - Exchange credentials for a session token
//! - POST /v1/user/logout - End a session

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;
use warden_auth::{SessionClaim, TokenPurpose};
use warden_common::{verify_password, ValidatedJson};

use crate::api::error::ApiError;
use crate::api::handlers::registration::AuthResponse;
use crate::api::middleware::AccountsState;
use crate::domain::validation::normalize_email;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /v1/user/login
///
/// Unknown email and wrong password answer the same way.
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = normalize_email(&request.email);

    let account = state
        .store
        .find_by_email(&email)
        .await?
        .filter(|account| verify_password(&request.password, &account.password_hash))
        .ok_or(ApiError::InvalidCredentials)?;

    let token = state
        .tokens
        .issue(&account.subject_id(), TokenPurpose::Session)?;

    tracing::info!(user_id = %account.id, "Session started");

    Ok(Json(AuthResponse {
        user: account,
        token,
    }))
}

/// POST /v1/user/logout
///
/// Sessions are stateless; the client discards its token and the token
/// runs out at the end of its window.
pub async fn logout(SessionClaim(claim): SessionClaim) -> Json<Value> {
    tracing::info!(user_id = %claim.sub, token_id = %claim.jti, "Session ended");
    Json(json!({ "success": "ok" }))
}
