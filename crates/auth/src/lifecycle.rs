//! Claim lifecycle state machine
//!
//! Conceptual only, never persisted:
//! - `Issued` → `Valid` | `Expired` | `Invalid` on verification
//! - `Valid` → `Valid` on a repeated session check
//! - `Valid` → `Redeemed` once the caller applies a redeemable claim
//!
//! `Expired`, `Invalid` and `Redeemed` are terminal.

use warden_common::StateError;

use crate::claims::Claim;
use crate::error::TokenError;
use crate::purpose::TokenPurpose;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimState {
    Issued,
    Valid,
    Expired,
    Invalid,
    Redeemed,
}

impl ClaimState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired | Self::Invalid | Self::Redeemed)
    }

    /// State reached by verifying an issued token
    pub fn from_verification(result: &Result<Claim, TokenError>) -> Self {
        match result {
            Ok(_) => Self::Valid,
            Err(TokenError::Expired { .. }) => Self::Expired,
            Err(_) => Self::Invalid,
        }
    }
}

impl std::fmt::Display for ClaimState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Issued => write!(f, "issued"),
            Self::Valid => write!(f, "valid"),
            Self::Expired => write!(f, "expired"),
            Self::Invalid => write!(f, "invalid"),
            Self::Redeemed => write!(f, "redeemed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimEvent {
    /// Verification succeeded
    Accept,
    /// Window elapsed
    Expire,
    /// Signature, encoding or purpose check failed
    Reject,
    /// Caller applied the claim to account state
    Redeem,
}

impl std::fmt::Display for ClaimEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Expire => write!(f, "expire"),
            Self::Reject => write!(f, "reject"),
            Self::Redeem => write!(f, "redeem"),
        }
    }
}

/// Guard context for `Redeem`
#[derive(Debug, Clone, Copy)]
pub struct RedemptionGuard {
    pub purpose: TokenPurpose,
    /// Account state already reflects this claim (e.g. already activated)
    pub already_redeemed: bool,
}

pub struct ClaimStateMachine;

impl ClaimStateMachine {
    pub fn transition(
        current: ClaimState,
        event: ClaimEvent,
        guard: Option<&RedemptionGuard>,
    ) -> Result<ClaimState, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (current, event) {
            (ClaimState::Issued, ClaimEvent::Accept) => ClaimState::Valid,
            (ClaimState::Issued, ClaimEvent::Expire) => ClaimState::Expired,
            (ClaimState::Issued, ClaimEvent::Reject) => ClaimState::Invalid,

            (ClaimState::Valid, ClaimEvent::Accept) => ClaimState::Valid,
            (ClaimState::Valid, ClaimEvent::Expire) => ClaimState::Expired,
            (ClaimState::Valid, ClaimEvent::Redeem) => {
                let guard = guard.ok_or_else(|| {
                    StateError::GuardFailed("Redemption requires a guard context".to_string())
                })?;
                if !guard.purpose.is_redeemable() {
                    return Err(StateError::GuardFailed(format!(
                        "{} claims are not redeemable",
                        guard.purpose
                    )));
                }
                if guard.already_redeemed {
                    return Err(StateError::GuardFailed(format!(
                        "{} claim already redeemed",
                        guard.purpose
                    )));
                }
                ClaimState::Redeemed
            }

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Verify-then-redeem in one step: the state a redeemable claim ends in.
    pub fn redeem(
        verification: &Result<Claim, TokenError>,
        guard: &RedemptionGuard,
    ) -> Result<ClaimState, StateError> {
        let verified = ClaimState::from_verification(verification);
        Self::transition(verified, ClaimEvent::Redeem, Some(guard))
    }
}
