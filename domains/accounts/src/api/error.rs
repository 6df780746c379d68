//! Error responses for the accounts API
//!
//! Every body has the shape `{"error": {"code": "...", "message": "..."}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use warden_auth::{AuthError, IssueError, TokenError, INVALID_TOKEN_MESSAGE};
use warden_common::{CredentialError, RepositoryError};
use warden_email::EmailError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Registration input rejected
    #[error("Not acceptable: {0}")]
    NotAcceptable(String),

    /// Profile update named a field outside the allowlist
    #[error("invalid update")]
    InvalidUpdate,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Link token failed verification or was already used
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Session subject no longer has an account
    #[error("User not found")]
    UserNotFound,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Session authentication failed")]
    Auth(AuthError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            ApiError::InvalidUpdate
            | ApiError::Validation(_)
            | ApiError::BadRequest(_)
            | ApiError::InvalidToken => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::UserNotFound | ApiError::Auth(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotAcceptable(_) => "NOT_ACCEPTABLE",
            ApiError::InvalidUpdate => "INVALID_UPDATE",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::InvalidToken => "INVALID_TOKEN",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::UserNotFound => "USER_NOT_FOUND",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Auth(_) => "UNAUTHORIZED",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::NotAcceptable(msg)
            | ApiError::Validation(msg)
            | ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg.clone(),
            ApiError::InvalidToken => INVALID_TOKEN_MESSAGE.to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Auth(err) = self {
            return err.into_response();
        }

        if let ApiError::Internal(e) = &self {
            tracing::error!(error = %e, "Internal server error");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.client_message(),
            }
        }));

        (self.status_code(), body).into_response()
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        tracing::debug!(reason = err.kind(), error = %err, "Link token rejected");
        ApiError::InvalidToken
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<IssueError> for ApiError {
    fn from(err: IssueError) -> Self {
        ApiError::Internal(anyhow::Error::new(err).context("Failed to issue token"))
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        ApiError::Internal(anyhow::Error::new(err))
    }
}

impl From<EmailError> for ApiError {
    fn from(err: EmailError) -> Self {
        ApiError::Internal(anyhow::Error::new(err).context("Failed to send email"))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::NotFound("User not found!".to_string()),
            RepositoryError::AlreadyExists => {
                ApiError::Conflict("Email is already in use".to_string())
            }
            RepositoryError::InvalidData(msg) => ApiError::Validation(msg),
            RepositoryError::Connection(e) => {
                ApiError::Internal(anyhow::Error::new(e).context("Account store failure"))
            }
        }
    }
}
