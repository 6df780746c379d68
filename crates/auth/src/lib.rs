//! Token authority for Warden
//!
//! Issues and verifies signed, time-bounded claims for four purposes
//! (session, password reset, activation, invite) and provides the axum
//! session extractor built on it.

mod authority;
mod claims;
mod config;
mod error;
mod extractors;
mod jwt;
pub mod lifecycle;
mod purpose;

pub use authority::TokenAuthority;
pub use claims::Claim;
pub use config::AuthConfig;
pub use error::{AuthConfigError, AuthError, IssueError, TokenError, INVALID_TOKEN_MESSAGE};
pub use extractors::SessionClaim;
pub use lifecycle::{ClaimEvent, ClaimState, ClaimStateMachine, RedemptionGuard};
pub use purpose::{ExpiryPolicy, TokenPurpose};
