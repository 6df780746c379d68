//! Token authority: issues and verifies purpose-bound, time-limited claims
//!
//! The authority is stateless. It holds only the signing keys derived from
//! the injected [`AuthConfig`], so one instance can be cloned into every
//! request handler. The same unexpired token verifies any number of times;
//! callers that need single use must record redemption in account state.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation};
use uuid::Uuid;

use crate::claims::Claim;
use crate::config::AuthConfig;
use crate::error::{IssueError, TokenError};
use crate::jwt::{decode_claim, sign_claim, validation};
use crate::purpose::{ExpiryPolicy, TokenPurpose};

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
}

#[derive(Clone)]
pub struct TokenAuthority {
    keys: Arc<Keys>,
}

impl std::fmt::Debug for TokenAuthority {
    #[mutants::skip] // Formatting only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("issuer", &self.keys.issuer)
            .finish_non_exhaustive()
    }
}

impl TokenAuthority {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation: validation(config.issuer.as_deref()),
                issuer: config.issuer.clone(),
            }),
        }
    }

    /// Issue a token using the purpose's default window
    pub fn issue(&self, subject_id: &str, purpose: TokenPurpose) -> Result<String, IssueError> {
        self.issue_at(subject_id, purpose, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject_id: &str,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<String, IssueError> {
        let exp = match purpose.policy() {
            ExpiryPolicy::FixedWindow(_) => None,
            ExpiryPolicy::Explicit(ttl) => Some(now + ttl),
        };
        self.sign(subject_id, purpose, now, exp)
    }

    /// Issue a token with an explicit lifetime.
    ///
    /// Only purposes with an explicit expiry accept a ttl.
    pub fn issue_with_ttl(
        &self,
        subject_id: &str,
        purpose: TokenPurpose,
        ttl: Duration,
    ) -> Result<String, IssueError> {
        self.issue_with_ttl_at(subject_id, purpose, ttl, Utc::now())
    }

    pub fn issue_with_ttl_at(
        &self,
        subject_id: &str,
        purpose: TokenPurpose,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, IssueError> {
        if let ExpiryPolicy::FixedWindow(_) = purpose.policy() {
            return Err(IssueError::FixedWindow(purpose));
        }
        if ttl <= Duration::zero() {
            return Err(IssueError::InvalidTtl);
        }
        self.sign(subject_id, purpose, now, Some(now + ttl))
    }

    fn sign(
        &self,
        subject_id: &str,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String, IssueError> {
        if subject_id.trim().is_empty() {
            return Err(IssueError::EmptySubject);
        }

        let claim = Claim {
            sub: subject_id.to_string(),
            purpose,
            iat: now.timestamp(),
            exp: expires_at.map(|at| at.timestamp()),
            jti: Uuid::new_v4().to_string(),
            iss: self.keys.issuer.clone(),
        };

        let token = sign_claim(&claim, &self.keys.encoding)?;

        tracing::debug!(
            token_id = %claim.jti,
            purpose = %purpose,
            expires_at = %claim.expires_at(),
            "Token issued"
        );

        Ok(token)
    }

    /// Verify a token for the expected purpose
    pub fn verify(&self, token: &str, expected: TokenPurpose) -> Result<Claim, TokenError> {
        self.verify_at(token, expected, Utc::now())
    }

    /// Verify at a given instant.
    ///
    /// Checks run signature, then expiry, then purpose, so each failure kind
    /// implies the earlier checks passed.
    pub fn verify_at(
        &self,
        token: &str,
        expected: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<Claim, TokenError> {
        let claim = decode_claim(token, &self.keys.decoding, &self.keys.validation)?;

        if claim.is_expired_at(now) {
            return Err(TokenError::Expired {
                expired_at: claim.expires_at(),
            });
        }

        if claim.purpose != expected {
            return Err(TokenError::PurposeMismatch {
                expected,
                actual: claim.purpose,
            });
        }

        Ok(claim)
    }
}
