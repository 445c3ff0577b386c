//! Credential Store — the persistence contract the auth flow depends on.
//!
//! `AppState` carries an `Arc<dyn CredentialStore>`; production wires in
//! `PgCredentialStore`, tests use the in-memory fake.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

pub use crate::models::user::UserIdentity;
#[cfg(test)]
pub use memory::MemoryCredentialStore;
pub use postgres::PgCredentialStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    Conflict,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserIdentity>, StoreError>;

    /// Creates the identity and its password digest as one atomic unit.
    /// Fails with `StoreError::Conflict` when the email is taken; on any
    /// failure nothing is persisted.
    async fn create_identity_with_credential(
        &self,
        email: &str,
        password_hash: &str,
        github_username: Option<&str>,
    ) -> Result<UserIdentity, StoreError>;
}
