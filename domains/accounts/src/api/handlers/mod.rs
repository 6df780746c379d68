//! HTTP handlers for the accounts API

pub mod activation;
pub mod invites;
pub mod password;
pub mod profile;
pub mod registration;
pub mod session;
