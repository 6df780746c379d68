//! JWS encoding, decoding and bearer header helpers

use axum::http::HeaderValue;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::claims::Claim;
use crate::error::{AuthError, IssueError, TokenError};

pub(crate) const ALGORITHM: Algorithm = Algorithm::HS256;

/// Sign a claim into a compact JWS
pub(crate) fn sign_claim(claim: &Claim, key: &EncodingKey) -> Result<String, IssueError> {
    encode(&Header::new(ALGORITHM), claim, key).map_err(IssueError::Signing)
}

/// Validation rules for decoding.
///
/// Expiry is deliberately left to the caller: fixed-window purposes carry no
/// `exp`, and verification time must be injectable.
pub(crate) fn validation(issuer: Option<&str>) -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["sub"]);

    if let Some(iss) = issuer {
        validation.set_issuer(&[iss]);
    }

    validation
}

/// Decode and check the signature of a token.
pub(crate) fn decode_claim(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
) -> Result<Claim, TokenError> {
    decode::<Claim>(token, key, validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            // Signed by another key, another algorithm or another authority
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::InvalidIssuer => {
                TokenError::InvalidSignature
            }
            _ => TokenError::MalformedToken,
        })
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    match header_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AuthError::InvalidAuthorizationFormat),
    }
}
