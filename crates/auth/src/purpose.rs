//! Token purposes and their validity windows

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// The single use-case a token was issued for.
///
/// Encoded in every claim so a token minted for one flow cannot be
/// replayed against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenPurpose {
    Session,
    PasswordReset,
    Activation,
    Invite,
}

/// How a purpose derives `expires_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// `issued_at + window`, nothing extra stored in the claim
    FixedWindow(Duration),
    /// Explicit `exp` written at issuance; the duration is the default ttl
    Explicit(Duration),
}

impl ExpiryPolicy {
    pub fn window(&self) -> Duration {
        match self {
            ExpiryPolicy::FixedWindow(window) | ExpiryPolicy::Explicit(window) => *window,
        }
    }
}

impl TokenPurpose {
    pub const ALL: [TokenPurpose; 4] = [
        TokenPurpose::Session,
        TokenPurpose::PasswordReset,
        TokenPurpose::Activation,
        TokenPurpose::Invite,
    ];

    pub fn policy(&self) -> ExpiryPolicy {
        match self {
            TokenPurpose::Session => ExpiryPolicy::FixedWindow(Duration::hours(3)),
            TokenPurpose::PasswordReset => ExpiryPolicy::Explicit(Duration::hours(3)),
            TokenPurpose::Activation => ExpiryPolicy::FixedWindow(Duration::hours(24)),
            TokenPurpose::Invite => ExpiryPolicy::Explicit(Duration::hours(24)),
        }
    }

    /// Whether a verified claim of this purpose is consumed by the caller.
    ///
    /// Session claims stay re-checkable for their whole window.
    pub fn is_redeemable(&self) -> bool {
        !matches!(self, TokenPurpose::Session)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::Session => "session",
            TokenPurpose::PasswordReset => "password-reset",
            TokenPurpose::Activation => "activation",
            TokenPurpose::Invite => "invite",
        }
    }
}

impl std::fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
