//! Accounts domain: registration, profile, password reset, activation, invites

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Account, NewAccount, ProfileChanges};
pub use domain::validation::UPDATABLE_FIELDS;

// Re-export repository types
pub use repository::{AccountStore, InMemoryAccountStore, PgAccountStore};

// Re-export API types
pub use api::routes;
pub use api::{AccountsState, ApiError, CurrentAccount};
