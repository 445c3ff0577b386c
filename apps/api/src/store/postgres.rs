use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::{CredentialStore, StoreError, UserIdentity};

/// `users` table backed store. `email` carries a UNIQUE constraint.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserIdentity>, StoreError> {
        Ok(sqlx::query_as::<_, UserIdentity>(
            "SELECT user_id, email, password_hash, github_username, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_identity_with_credential(
        &self,
        email: &str,
        password_hash: &str,
        github_username: Option<&str>,
    ) -> Result<UserIdentity, StoreError> {
        // Single statement: the uniqueness check, the row and its digest land
        // together or not at all, even under concurrent registrations.
        let created: Option<UserIdentity> = sqlx::query_as(
            r#"
            INSERT INTO users (user_id, email, password_hash, github_username)
            VALUES (gen_random_uuid(), $1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING user_id, email, password_hash, github_username, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(github_username)
        .fetch_optional(&self.pool)
        .await?;

        let created = created.ok_or(StoreError::Conflict)?;
        info!("Registered user {}", created.user_id);
        Ok(created)
    }
}
