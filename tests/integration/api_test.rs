//! API endpoint integration tests
//!
//! Drives the full Warden router: registration, sessions, profile,
//! password recovery, activation and invites.

#![allow(dead_code)]

mod activation;
mod common;
mod invites;
mod password;
mod profile;
mod registration;
mod sessions;
