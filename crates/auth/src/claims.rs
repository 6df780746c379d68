//! Claim carried inside every signed token

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::purpose::TokenPurpose;

/// Signed token payload.
///
/// `exp` is only present for purposes with an explicit expiry; fixed-window
/// purposes derive it from `iat`. Either way the claim alone is enough to
/// decide expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Subject (account ID)
    pub sub: String,
    pub purpose: TokenPurpose,
    /// Issued at, unix seconds
    pub iat: i64,
    /// Explicit expiry, unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Token ID, safe to log
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claim {
    pub fn subject_id(&self) -> &str {
        &self.sub
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp(self.iat)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        match self.exp {
            Some(exp) => timestamp(exp),
            None => self
                .issued_at()
                .checked_add_signed(self.purpose.policy().window())
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        }
    }

    /// Expired strictly after `expires_at`; the boundary second is still valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at()
    }
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
