//! Domain entities for the Warden accounts domain
//!
//! An account is created on registration, activated once through an
//! activation claim, edited through the profile allowlist and removed on
//! request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account entity
///
/// `password_hash` is an argon2 PHC string and is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub is_activated: bool,
    /// Last time the password was replaced, by reset or profile update
    #[serde(skip)]
    pub password_changed_at: Option<DateTime<Utc>>,
    /// Token ID of the last redeemed password-reset claim
    #[serde(skip)]
    pub password_reset_jti: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build a fresh, not yet activated account
    pub fn new(new_account: NewAccount) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: new_account.name,
            email: new_account.email,
            password_hash: new_account.password_hash,
            company: new_account.company,
            website: new_account.website,
            location: new_account.location,
            about: new_account.about,
            is_activated: false,
            password_changed_at: None,
            password_reset_jti: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Subject used in every token issued for this account
    pub fn subject_id(&self) -> String {
        self.id.to_string()
    }

    /// Whether a password-reset claim can no longer be redeemed.
    ///
    /// The claim that made the last change is recognised by its token ID.
    /// Any claim issued in an earlier second than the last change is stale.
    pub fn password_reset_spent(&self, issued_at: DateTime<Utc>, token_id: &str) -> bool {
        if self.password_reset_jti.as_deref() == Some(token_id) {
            return true;
        }
        self.password_changed_at
            .is_some_and(|changed_at| changed_at.timestamp() > issued_at.timestamp())
    }

    /// Replace the password hash through a redeemed reset claim
    pub fn reset_password(&mut self, password_hash: String, token_id: &str) {
        let now = Utc::now();
        self.password_hash = password_hash;
        self.password_changed_at = Some(now);
        self.password_reset_jti = Some(token_id.to_string());
        self.updated_at = now;
    }

    /// Apply profile changes; absent fields are left untouched and an
    /// explicit `Some(None)` clears an optional field
    pub fn apply(&mut self, changes: ProfileChanges) {
        let now = Utc::now();
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            self.password_hash = password_hash;
            self.password_changed_at = Some(now);
        }
        if let Some(company) = changes.company {
            self.company = company;
        }
        if let Some(website) = changes.website {
            self.website = website;
        }
        if let Some(location) = changes.location {
            self.location = location;
        }
        if let Some(about) = changes.about {
            self.about = about;
        }
        self.updated_at = now;
    }
}

/// Data needed to create an account; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
}

/// Partial profile update
///
/// Optional profile fields use `Option<Option<_>>`: outer `None` leaves the
/// field alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub company: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub about: Option<Option<String>>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
