//! Validation helpers for profile updates

use serde_json::{Map, Value};

/// Profile fields a caller may change
pub const UPDATABLE_FIELDS: [&str; 7] = [
    "name", "email", "password", "company", "website", "location", "about",
];

/// Whether `field` is in the update allowlist
pub fn is_updatable(field: &str) -> bool {
    UPDATABLE_FIELDS.contains(&field)
}

/// First key of an update body that is not allowed, if any.
///
/// A single disallowed key rejects the whole update.
pub fn first_disallowed_field(body: &Map<String, Value>) -> Option<&str> {
    body.keys()
        .map(String::as_str)
        .find(|field| !is_updatable(field))
}

/// Canonical form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
