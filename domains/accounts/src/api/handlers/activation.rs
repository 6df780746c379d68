//! Account activation
//!
//! Implements:
//! - GET /v1/user/activate/{token} - Redeem an activation token
//! - POST /v1/user/activate/resend - Email a fresh activation link

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;
use warden_auth::{ClaimStateMachine, RedemptionGuard, TokenPurpose};

use crate::api::error::ApiError;
use crate::api::middleware::{AccountsState, CurrentAccount};
use crate::domain::entities::Account;

/// Issue an activation token for `account` and email the link
pub(crate) async fn send_activation_email(
    state: &AccountsState,
    account: &Account,
) -> Result<(), ApiError> {
    let token = state
        .tokens
        .issue(&account.subject_id(), TokenPurpose::Activation)?;

    state
        .email
        .send_activation_email(&account.email, &account.name, &token)
        .await?;

    Ok(())
}

/// GET /v1/user/activate/{token}
///
/// An activation claim is redeemed at most once; a second attempt answers
/// like any other bad token.
pub async fn activate(
    State(state): State<AccountsState>,
    Path(token): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let verification = state.tokens.verify(&token, TokenPurpose::Activation);
    let claim = verification.clone()?;

    let not_found = || ApiError::NotFound("User not found!".to_string());
    let account_id = Uuid::parse_str(claim.subject_id()).map_err(|_| not_found())?;
    let account = state
        .store
        .find_by_id(account_id)
        .await?
        .ok_or_else(not_found)?;

    let guard = RedemptionGuard {
        purpose: TokenPurpose::Activation,
        already_redeemed: account.is_activated,
    };
    ClaimStateMachine::redeem(&verification, &guard).map_err(|e| {
        tracing::debug!(user_id = %account.id, token_id = %claim.jti, error = %e, "Activation refused");
        ApiError::InvalidToken
    })?;

    // Lost a race with a concurrent redemption of the same claim
    if !state.store.activate(account.id).await? {
        return Err(ApiError::InvalidToken);
    }

    tracing::info!(user_id = %account.id, token_id = %claim.jti, "Account activated");

    Ok(Json(json!({ "msg": "Successfully activated!" })))
}

/// POST /v1/user/activate/resend
pub async fn resend_activation(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AccountsState>,
) -> Result<Json<Value>, ApiError> {
    if account.is_activated {
        return Err(ApiError::Conflict("Account is already activated".to_string()));
    }

    send_activation_email(&state, &account).await?;

    tracing::info!(user_id = %account.id, "Activation link resent");

    Ok(Json(json!({ "success": true })))
}
