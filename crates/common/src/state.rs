//! State machine error type
//!
//! Returned by the lifecycle machines in the auth and accounts crates.

use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Invalid transition: {event} is not allowed from {from}")]
    InvalidTransition { from: String, event: String },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),

    #[error("Terminal state: {0} cannot transition")]
    TerminalState(String),
}
