//! Postgres account store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{AccountStore, RepositoryResult};
use crate::domain::entities::{Account, NewAccount, ProfileChanges};

const ACCOUNT_COLUMNS: &str = "id, name, email, password_hash, company, website, location, about, \
     is_activated, password_changed_at, password_reset_jti, created_at, updated_at";

#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, new_account: NewAccount) -> RepositoryResult<Account> {
        let account = Account::new(new_account);

        let query = format!(
            r#"
            INSERT INTO accounts ({ACCOUNT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Account>(&query)
            .bind(account.id)
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.company)
            .bind(&account.website)
            .bind(&account.location)
            .bind(&account.about)
            .bind(account.is_activated)
            .bind(account.password_changed_at)
            .bind(&account.password_reset_jti)
            .bind(account.created_at)
            .bind(account.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Account>> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");

        let account = sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Account>> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1");

        let account = sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> RepositoryResult<Option<Account>> {
        // Optional columns bind a "present" flag next to the value so that an
        // explicit null clears the column
        let query = format!(
            r#"
            UPDATE accounts SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                password_changed_at = CASE WHEN $4 IS NULL THEN password_changed_at ELSE NOW() END,
                company = CASE WHEN $5 THEN $6 ELSE company END,
                website = CASE WHEN $7 THEN $8 ELSE website END,
                location = CASE WHEN $9 THEN $10 ELSE location END,
                about = CASE WHEN $11 THEN $12 ELSE about END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(changes.name)
            .bind(changes.email)
            .bind(changes.password_hash)
            .bind(changes.company.is_some())
            .bind(changes.company.flatten())
            .bind(changes.website.is_some())
            .bind(changes.website.flatten())
            .bind(changes.location.is_some())
            .bind(changes.location.flatten())
            .bind(changes.about.is_some())
            .bind(changes.about.flatten())
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn reset_password(
        &self,
        id: Uuid,
        password_hash: &str,
        issued_at: DateTime<Utc>,
        token_id: &str,
    ) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                password_hash = $2,
                password_changed_at = NOW(),
                password_reset_jti = $4,
                updated_at = NOW()
            WHERE id = $1
              AND password_reset_jti IS DISTINCT FROM $4
              AND (password_changed_at IS NULL
                   OR date_trunc('second', password_changed_at) <= date_trunc('second', $3))
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .bind(issued_at)
        .bind(token_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn activate(&self, id: Uuid) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET is_activated = TRUE, updated_at = NOW()
            WHERE id = $1 AND is_activated = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<Option<Account>> {
        let query = format!("DELETE FROM accounts WHERE id = $1 RETURNING {ACCOUNT_COLUMNS}");

        let deleted = sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(deleted)
    }
}
