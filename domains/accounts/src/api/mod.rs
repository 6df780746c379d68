//! API layer for the accounts domain
//!
//! Contains HTTP handlers, routes, errors and the domain state definition.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use error::ApiError;
pub use middleware::{AccountsState, CurrentAccount};
pub use routes::routes;
