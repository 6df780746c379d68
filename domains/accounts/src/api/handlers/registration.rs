//! Account registration
//!
//! Implements:
//! - POST /v1/user - Create an account, answer with a session token and
//!   email the activation link

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;
use warden_auth::TokenPurpose;
use warden_common::{hash_password, RepositoryError, ValidatedJson, ValidatedJsonRejection};

use crate::api::error::ApiError;
use crate::api::handlers::activation::send_activation_email;
use crate::api::middleware::AccountsState;
use crate::domain::entities::{Account, NewAccount};
use crate::domain::validation::normalize_email;

/// Request for creating an account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 1024))]
    pub password: String,

    #[validate(length(max = 255))]
    pub company: Option<String>,

    #[validate(url)]
    pub website: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[validate(length(max = 2000))]
    pub about: Option<String>,
}

/// Account plus a freshly issued session token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: Account,
    pub token: String,
}

/// POST /v1/user - Register a new account
///
/// Invalid input and taken emails both answer 406. A failed activation
/// email is logged; the account still exists and can ask for a resend.
pub async fn register(
    State(state): State<AccountsState>,
    payload: Result<ValidatedJson<RegisterRequest>, ValidatedJsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let ValidatedJson(request) =
        payload.map_err(|rejection| ApiError::NotAcceptable(rejection.reason()))?;

    let new_account = NewAccount {
        name: request.name.trim().to_string(),
        email: normalize_email(&request.email),
        password_hash: hash_password(&request.password)?,
        company: request.company,
        website: request.website,
        location: request.location,
        about: request.about,
    };

    let account = state
        .store
        .create(new_account)
        .await
        .map_err(|e| match e {
            RepositoryError::AlreadyExists => {
                ApiError::NotAcceptable("Email is already registered".to_string())
            }
            other => other.into(),
        })?;

    let token = state
        .tokens
        .issue(&account.subject_id(), TokenPurpose::Session)?;

    if let Err(e) = send_activation_email(&state, &account).await {
        tracing::warn!(
            user_id = %account.id,
            error = %e,
            "Activation email not delivered during registration"
        );
    }

    tracing::info!(user_id = %account.id, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: account,
            token,
        }),
    ))
}
