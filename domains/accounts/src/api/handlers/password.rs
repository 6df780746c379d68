//! Password recovery
//!
//! Implements:
//! - POST /v1/user/password/forgot - Email a password reset link
//! - POST /v1/user/password/reset/{token} - Set a new password with a reset token

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;
use warden_auth::{ClaimStateMachine, RedemptionGuard, TokenPurpose};
use warden_common::{hash_password, ValidatedJson};

use crate::api::error::ApiError;
use crate::api::middleware::AccountsState;
use crate::domain::validation::normalize_email;

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 8, max = 1024))]
    pub password: String,
}

/// POST /v1/user/password/forgot
///
/// The reset token only ever travels by email.
pub async fn forgot_password(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = normalize_email(&request.email);

    let account = state
        .store
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found!".to_string()))?;

    let token = state
        .tokens
        .issue(&account.subject_id(), TokenPurpose::PasswordReset)?;

    state
        .email
        .send_password_reset_email(&account.email, &account.name, &token)
        .await?;

    tracing::info!(user_id = %account.id, "Password reset link sent");

    Ok(Json(json!({ "success": true })))
}

/// POST /v1/user/password/reset/{token}
///
/// The account comes from the token subject, never from the request body.
/// A reset claim is redeemed at most once, and a password change spends
/// every reset claim issued before it.
pub async fn reset_password(
    State(state): State<AccountsState>,
    Path(token): Path<String>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    let verification = state.tokens.verify(&token, TokenPurpose::PasswordReset);
    let claim = verification.clone()?;

    let no_such_user = || ApiError::BadRequest("No such user".to_string());
    let account_id = Uuid::parse_str(claim.subject_id()).map_err(|_| no_such_user())?;
    let account = state
        .store
        .find_by_id(account_id)
        .await?
        .ok_or_else(no_such_user)?;

    let guard = RedemptionGuard {
        purpose: TokenPurpose::PasswordReset,
        already_redeemed: account.password_reset_spent(claim.issued_at(), &claim.jti),
    };
    ClaimStateMachine::redeem(&verification, &guard).map_err(|e| {
        tracing::debug!(user_id = %account.id, token_id = %claim.jti, error = %e, "Password reset refused");
        ApiError::InvalidToken
    })?;

    let password_hash = hash_password(&request.password)?;

    // Lost a race with a concurrent redemption, or the account went away
    if !state
        .store
        .reset_password(account.id, &password_hash, claim.issued_at(), &claim.jti)
        .await?
    {
        return Err(ApiError::InvalidToken);
    }

    tracing::info!(user_id = %account_id, token_id = %claim.jti, "Password reset");

    Ok(Json(json!({ "updated": true })))
}
