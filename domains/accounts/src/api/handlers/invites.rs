//! Invitations
//!
//! Implements:
//! - GET /v1/user/invite - Invite link for the current account
//! - POST /v1/user/invite - Email an invite link
//! - GET /v1/user/invite/{token} - Check an invite link before registering

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;
use warden_auth::TokenPurpose;
use warden_common::ValidatedJson;
use warden_email::content::invite_url;

use crate::api::error::ApiError;
use crate::api::middleware::{AccountsState, CurrentAccount};
use crate::domain::entities::Account;
use crate::domain::validation::normalize_email;

#[derive(Debug, Deserialize, Validate)]
pub struct SendInviteRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteLinkResponse {
    pub invite_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<bool>,
}

fn invite_link_for(state: &AccountsState, inviter: &Account) -> Result<String, ApiError> {
    let token = state
        .tokens
        .issue(&inviter.subject_id(), TokenPurpose::Invite)?;
    Ok(invite_url(&state.app_base_url, &token))
}

/// GET /v1/user/invite
pub async fn invite_link(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AccountsState>,
) -> Result<Json<InviteLinkResponse>, ApiError> {
    let invite_link = invite_link_for(&state, &account)?;

    tracing::info!(user_id = %account.id, "Invite link issued");

    Ok(Json(InviteLinkResponse {
        invite_link,
        sent: None,
    }))
}

/// POST /v1/user/invite
pub async fn send_invite(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<SendInviteRequest>,
) -> Result<Json<InviteLinkResponse>, ApiError> {
    let invite_link = invite_link_for(&state, &account)?;
    let recipient = normalize_email(&request.email);

    state
        .email
        .send_invitation_email(&recipient, &account.name, &invite_link)
        .await?;

    tracing::info!(user_id = %account.id, "Invite link emailed");

    Ok(Json(InviteLinkResponse {
        invite_link,
        sent: Some(true),
    }))
}

/// GET /v1/user/invite/{token}
///
/// Valid while the token is unexpired and the inviting account still exists.
pub async fn process_invite(
    State(state): State<AccountsState>,
    Path(token): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let claim = state.tokens.verify(&token, TokenPurpose::Invite)?;

    let inviter_id = Uuid::parse_str(claim.subject_id()).map_err(|_| ApiError::InvalidToken)?;
    if state.store.find_by_id(inviter_id).await?.is_none() {
        tracing::debug!(user_id = %inviter_id, token_id = %claim.jti, "Inviter no longer exists");
        return Err(ApiError::InvalidToken);
    }

    Ok(Json(json!({
        "success": true,
        "msg": "Redirect user to register in client side!",
    })))
}
