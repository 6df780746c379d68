//! In-memory account store, used when no database is configured and in tests

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use warden_common::RepositoryError;

use super::{AccountStore, RepositoryResult};
use crate::domain::entities::{Account, NewAccount, ProfileChanges};

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, Account>> {
        self.accounts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, Account>> {
        self.accounts.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

fn email_taken(accounts: &HashMap<Uuid, Account>, email: &str, except: Option<Uuid>) -> bool {
    accounts
        .values()
        .any(|a| a.email == email && Some(a.id) != except)
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, new_account: NewAccount) -> RepositoryResult<Account> {
        let mut accounts = self.write();
        if email_taken(&accounts, &new_account.email, None) {
            return Err(RepositoryError::AlreadyExists);
        }

        let account = Account::new(new_account);
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Account>> {
        Ok(self.read().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Account>> {
        Ok(self.read().values().find(|a| a.email == email).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> RepositoryResult<Option<Account>> {
        let mut accounts = self.write();

        if let Some(email) = changes.email.as_deref() {
            if email_taken(&accounts, email, Some(id)) {
                return Err(RepositoryError::AlreadyExists);
            }
        }

        Ok(accounts.get_mut(&id).map(|account| {
            account.apply(changes);
            account.clone()
        }))
    }

    async fn reset_password(
        &self,
        id: Uuid,
        password_hash: &str,
        issued_at: DateTime<Utc>,
        token_id: &str,
    ) -> RepositoryResult<bool> {
        let mut accounts = self.write();
        match accounts.get_mut(&id) {
            Some(account) if !account.password_reset_spent(issued_at, token_id) => {
                account.reset_password(password_hash.to_string(), token_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn activate(&self, id: Uuid) -> RepositoryResult<bool> {
        let mut accounts = self.write();
        match accounts.get_mut(&id) {
            Some(account) if !account.is_activated => {
                account.is_activated = true;
                account.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<Option<Account>> {
        Ok(self.write().remove(&id))
    }
}
