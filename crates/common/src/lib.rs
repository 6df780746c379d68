//! Shared utilities, configuration, and error handling for Warden
//!
//! - Configuration management following 12-factor principles
//! - Shared error body shape
//! - Validating JSON extractor
//! - Credential hashing

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod extractors;
pub mod state;

pub use config::{Config, LogFormat};
pub use crypto::{hash_password, verify_password, CredentialError};
pub use db::RepositoryError;
pub use error::Error;
pub use extractors::{ValidatedJson, ValidatedJsonRejection};
pub use state::StateError;
