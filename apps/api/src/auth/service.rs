use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::{AuthError, Claims, PasswordHasher, TokenService};
use crate::store::CredentialStore;

/// Orchestrates registration and login against the credential store.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
    /// Digest verified against when the email is unknown, so both login
    /// failures cost one Argon2 run.
    decoy_digest: Arc<str>,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user_id: Uuid,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Result<Self, AuthError> {
        let decoy_digest = hasher.hash(&Uuid::new_v4().to_string())?.into();
        Ok(Self {
            store,
            hasher,
            tokens,
            decoy_digest,
        })
    }

    /// Creates an account. The digest is computed before touching the store so
    /// the identity and its credential are written in one call.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        github_username: Option<&str>,
    ) -> Result<Uuid, AuthError> {
        if self.store.find_by_email(email).await?.is_some() {
            debug!("Registration rejected: email already taken");
            return Err(AuthError::Conflict);
        }

        let digest = self.hash_off_thread(password).await?;
        let identity = self
            .store
            .create_identity_with_credential(email, &digest, github_username)
            .await?;

        Ok(identity.user_id)
    }

    /// Verifies credentials and issues a session token. Unknown email and wrong
    /// password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let Some(identity) = self.store.find_by_email(email).await? else {
            self.verify_off_thread(password, &self.decoy_digest).await?;
            debug!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .verify_off_thread(password, &identity.password_hash)
            .await?
        {
            debug!("Login rejected: password mismatch for user {}", identity.user_id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&identity)?;
        info!("User {} logged in", identity.user_id);

        Ok(LoginOutcome {
            token,
            user_id: identity.user_id,
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token)
    }

    // Argon2 is deliberately slow; keep it off the async worker threads.
    async fn hash_off_thread(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Crypto(e.to_string()))?
    }

    async fn verify_off_thread(&self, password: &str, digest: &str) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let digest = digest.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AuthError::Crypto(e.to_string()))
    }
}
