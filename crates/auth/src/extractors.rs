//! Axum extractors for session authentication
//!
//! Generic over any state `S` where `TokenAuthority: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::authority::TokenAuthority;
use crate::claims::Claim;
use crate::error::AuthError;
use crate::jwt::extract_bearer_token;
use crate::purpose::TokenPurpose;

/// Verified session claim from `Authorization: Bearer <token>`
#[derive(Debug)]
pub struct SessionClaim(pub Claim);

impl<S> FromRequestParts<S> for SessionClaim
where
    TokenAuthority: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let authority = TokenAuthority::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let token = extract_bearer_token(auth_header)?;
        let claim = authority.verify(&token, TokenPurpose::Session)?;

        Ok(SessionClaim(claim))
    }
}
