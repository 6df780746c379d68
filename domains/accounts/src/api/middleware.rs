//! Accounts domain state and session-to-account resolution

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;
use warden_auth::{SessionClaim, TokenAuthority};
use warden_email::EmailService;

use crate::api::error::ApiError;
use crate::domain::entities::Account;
use crate::repository::AccountStore;

/// Application state for the accounts domain
#[derive(Clone)]
pub struct AccountsState {
    pub store: Arc<dyn AccountStore>,
    pub tokens: TokenAuthority,
    pub email: Arc<dyn EmailService>,
    /// Public base URL for links handed out or emailed
    pub app_base_url: String,
}

impl FromRef<AccountsState> for TokenAuthority {
    fn from_ref(state: &AccountsState) -> Self {
        state.tokens.clone()
    }
}

/// Account behind a verified session token.
///
/// A session whose subject no longer resolves to an account is rejected
/// with `USER_NOT_FOUND`.
#[derive(Debug)]
pub struct CurrentAccount(pub Account);

impl FromRequestParts<AccountsState> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AccountsState,
    ) -> Result<Self, Self::Rejection> {
        let SessionClaim(claim) = SessionClaim::from_request_parts(parts, state).await?;

        let account_id =
            Uuid::parse_str(claim.subject_id()).map_err(|_| ApiError::UserNotFound)?;

        let account = state
            .store
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = %account_id, token_id = %claim.jti, "Session subject has no account");
                ApiError::UserNotFound
            })?;

        Ok(CurrentAccount(account))
    }
}
