//! Accounts domain types and rules

pub mod entities;
pub mod validation;
