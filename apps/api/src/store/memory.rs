use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CredentialStore, StoreError, UserIdentity};

/// In-memory store keyed by email. The uniqueness check and insert share one
/// write-lock critical section.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    users: Arc<RwLock<HashMap<String, UserIdentity>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn all(&self) -> Vec<UserIdentity> {
        self.users.read().await.values().cloned().collect()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserIdentity>, StoreError> {
        self.check_online()?;
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create_identity_with_credential(
        &self,
        email: &str,
        password_hash: &str,
        github_username: Option<&str>,
    ) -> Result<UserIdentity, StoreError> {
        self.check_online()?;
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(StoreError::Conflict);
        }
        let identity = UserIdentity {
            user_id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            github_username: github_username.map(str::to_string),
            created_at: Utc::now(),
        };
        users.insert(email.to_string(), identity.clone());
        Ok(identity)
    }
}
