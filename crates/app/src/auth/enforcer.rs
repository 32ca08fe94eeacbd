//! Authorization policies.
//!
//! A grant is a `(subject, resource, action)` triple. Anything not granted is denied.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, query, query_scalar};
use thiserror::Error;

use crate::domain::users::records::UserUuid;

const POLICY_ALLOWED_SQL: &str = include_str!("sql/policy_allowed.sql");
const GRANT_POLICY_SQL: &str = include_str!("sql/grant_policy.sql");
const REVOKE_POLICY_SQL: &str = include_str!("sql/revoke_policy.sql");

#[derive(Debug, Error)]
pub enum EnforcerError {
    #[error("policy subject does not exist")]
    UnknownSubject,

    #[error("policy storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for EnforcerError {
    fn from(error: sqlx::Error) -> Self {
        if error
            .as_database_error()
            .is_some_and(|db| db.is_foreign_key_violation())
        {
            return Self::UnknownSubject;
        }

        Self::Sql(error)
    }
}

#[automock]
#[async_trait]
pub trait Enforcer: Send + Sync {
    /// Whether `subject` may perform `action` on `resource`.
    async fn allowed(
        &self,
        subject: UserUuid,
        resource: &str,
        action: &str,
    ) -> Result<bool, EnforcerError>;
}

#[derive(Debug, Clone)]
pub struct PgEnforcer {
    pool: PgPool,
}

impl PgEnforcer {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grant `action` on `resource` to `subject`. Granting twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is unknown or the insert fails.
    pub async fn grant(
        &self,
        subject: UserUuid,
        resource: &str,
        action: &str,
    ) -> Result<(), EnforcerError> {
        query(GRANT_POLICY_SQL)
            .bind(subject.into_uuid())
            .bind(resource)
            .bind(action)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Remove a grant. Returns `true` if one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn revoke(
        &self,
        subject: UserUuid,
        resource: &str,
        action: &str,
    ) -> Result<bool, EnforcerError> {
        let rows_affected = query(REVOKE_POLICY_SQL)
            .bind(subject.into_uuid())
            .bind(resource)
            .bind(action)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

#[async_trait]
impl Enforcer for PgEnforcer {
    async fn allowed(
        &self,
        subject: UserUuid,
        resource: &str,
        action: &str,
    ) -> Result<bool, EnforcerError> {
        let allowed: bool = query_scalar(POLICY_ALLOWED_SQL)
            .bind(subject.into_uuid())
            .bind(resource)
            .bind(action)
            .fetch_one(&self.pool)
            .await?;

        Ok(allowed)
    }
}
