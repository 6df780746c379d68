//! Profile handlers
//!
//! Implements:
//! - GET /v1/user/me - Current account
//! - PATCH /v1/user/me - Allowlisted profile update
//! - DELETE /v1/user/me - Delete the current account

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use validator::Validate;
use warden_common::{hash_password, RepositoryError};

use crate::api::error::ApiError;
use crate::api::middleware::{AccountsState, CurrentAccount};
use crate::domain::entities::{Account, ProfileChanges};
use crate::domain::validation::{first_disallowed_field, normalize_email};

/// Keeps a present `null` apart from an absent key: absent is `None`,
/// `null` is `Some(None)`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Profile update body, accepted only after the allowlist check
///
/// Every field distinguishes "not sent" from `null`. Optional profile
/// fields are cleared by `null`; required ones reject it.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "present")]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    #[validate(email)]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    #[validate(length(min = 8, max = 1024))]
    pub password: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = 255))]
    pub company: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    #[validate(url)]
    pub website: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = 255))]
    pub location: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = 2000))]
    pub about: Option<Option<String>>,
}

fn required(field: &'static str, value: Option<Option<String>>) -> Result<Option<String>, ApiError> {
    match value {
        Some(None) => Err(ApiError::Validation(format!("{} cannot be null", field))),
        Some(Some(value)) => Ok(Some(value)),
        None => Ok(None),
    }
}

impl UpdateProfileRequest {
    fn into_changes(self) -> Result<ProfileChanges, ApiError> {
        let name = required("name", self.name)?;
        let email = required("email", self.email)?;
        let password_hash = match required("password", self.password)? {
            Some(password) => Some(hash_password(&password)?),
            None => None,
        };

        Ok(ProfileChanges {
            name: name.map(|name| name.trim().to_string()),
            email: email.as_deref().map(normalize_email),
            password_hash,
            company: self.company,
            website: self.website,
            location: self.location,
            about: self.about,
        })
    }
}

/// GET /v1/user/me
pub async fn get_profile(CurrentAccount(account): CurrentAccount) -> Json<Account> {
    Json(account)
}

/// PATCH /v1/user/me
///
/// Any key outside the allowlist rejects the whole update before anything
/// is written.
pub async fn update_profile(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AccountsState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    let Value::Object(fields) = body else {
        return Err(ApiError::Validation(
            "Update body must be a JSON object".to_string(),
        ));
    };

    if let Some(field) = first_disallowed_field(&fields) {
        tracing::debug!(user_id = %account.id, field, "Rejected profile update");
        return Err(ApiError::InvalidUpdate);
    }

    let request: UpdateProfileRequest = serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::Validation(format!("Invalid update body: {}", e)))?;
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation failed: {}", e)))?;

    let changes = request.into_changes()?;
    if changes.is_empty() {
        return Ok(Json(json!({ "data": account })));
    }

    let updated = state
        .store
        .update_profile(account.id, changes)
        .await
        .map_err(|e| match e {
            RepositoryError::AlreadyExists => {
                ApiError::Conflict("Email is already in use".to_string())
            }
            other => other.into(),
        })?
        .ok_or(ApiError::UserNotFound)?;

    tracing::info!(user_id = %updated.id, "Profile updated");

    Ok(Json(json!({ "data": updated })))
}

/// DELETE /v1/user/me
pub async fn delete_account(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AccountsState>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state
        .store
        .delete(account.id)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %account.id, error = %e, "Failed to delete account");
            ApiError::Internal(anyhow::anyhow!("Failed to delete account: {}", e))
        })?
        .ok_or(ApiError::UserNotFound)?;

    tracing::info!(user_id = %deleted.id, "Account deleted");

    Ok(Json(json!({
        "data": "user deletion successful",
        "user": deleted,
    })))
}
