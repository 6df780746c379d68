//! Token and authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

use crate::purpose::TokenPurpose;

/// Message shown to clients for every token failure
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Startup configuration errors; fatal, never per-request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthConfigError {
    #[error("JWT_SECRET is required")]
    MissingSecret,

    #[error("JWT_SECRET must not be empty")]
    EmptySecret,
}

/// Token issuance errors
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("Token subject must not be empty")]
    EmptySubject,

    #[error("{0} tokens use a fixed validity window and take no ttl")]
    FixedWindow(TokenPurpose),

    #[error("Token lifetime must be positive")]
    InvalidTtl,

    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Token verification errors.
///
/// Kept distinct for logs and tests; clients only ever see
/// [`INVALID_TOKEN_MESSAGE`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    MalformedToken,

    #[error("Token signature does not match")]
    InvalidSignature,

    #[error("Token expired at {expired_at}")]
    Expired { expired_at: DateTime<Utc> },

    #[error("Token issued for {actual}, expected {expected}")]
    PurposeMismatch {
        expected: TokenPurpose,
        actual: TokenPurpose,
    },
}

impl TokenError {
    /// Stable label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::MalformedToken => "malformed",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired { .. } => "expired",
            TokenError::PurposeMismatch { .. } => "purpose_mismatch",
        }
    }
}

/// Authentication error for bearer-protected routes
#[derive(Debug)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        tracing::debug!(reason = err.kind(), error = %err, "Session token rejected");
        AuthError::InvalidToken
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingAuthorization => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTHORIZATION",
                "Authorization header required",
            ),
            AuthError::InvalidAuthorizationFormat => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                INVALID_TOKEN_MESSAGE,
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
