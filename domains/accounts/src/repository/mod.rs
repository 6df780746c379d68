//! Account storage
//!
//! Handlers talk to an [`AccountStore`]; the server picks the Postgres
//! implementation when `DATABASE_URL` is set and the in-memory one otherwise.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use warden_common::RepositoryError;

use crate::domain::entities::{Account, NewAccount, ProfileChanges};

pub use memory::InMemoryAccountStore;
pub use postgres::PgAccountStore;

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account. A taken email fails with `AlreadyExists`.
    async fn create(&self, new_account: NewAccount) -> RepositoryResult<Account>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Account>>;

    /// Apply profile changes, `None` when the account does not exist
    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> RepositoryResult<Option<Account>>;

    /// Replace the password hash by redeeming a password-reset claim.
    ///
    /// The update only applies while the claim is unspent (see
    /// [`Account::password_reset_spent`]). Returns true only for the call that
    /// applied it; false when the account is gone or the claim was spent,
    /// including by a concurrent redemption.
    async fn reset_password(
        &self,
        id: Uuid,
        password_hash: &str,
        issued_at: DateTime<Utc>,
        token_id: &str,
    ) -> RepositoryResult<bool>;

    /// Mark the account activated.
    ///
    /// Returns true only for the call that flipped the flag, so concurrent
    /// redemptions of one activation claim see exactly one success.
    async fn activate(&self, id: Uuid) -> RepositoryResult<bool>;

    /// Remove the account, returning it as it was
    async fn delete(&self, id: Uuid) -> RepositoryResult<Option<Account>>;
}
