//! Argon2id password hashing.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=…,t=…,p=…$salt$hash`) so the
//! salt and cost parameters travel with the digest. Verification reads the
//! parameters back out of the digest, which keeps old digests verifiable
//! after the default costs change.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier, Version};
#[cfg(test)]
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use super::AuthError;

#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    /// Shared across clones so tests can count verifications made on the
    /// blocking pool.
    #[cfg(test)]
    verifications: Arc<AtomicUsize>,
}

impl PasswordHasher {
    /// Argon2id with the crate's default (OWASP-aligned) cost parameters.
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }

    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            #[cfg(test)]
            verifications: Arc::default(),
        }
    }

    /// Minimum-cost parameters. Only for tests, where hundreds of hashes
    /// would otherwise dominate the run time.
    #[cfg(test)]
    pub fn insecure_fast() -> Self {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None)
            .expect("minimum argon2 params are valid");
        Self::with_params(params)
    }

    #[cfg(test)]
    pub fn verifications(&self) -> usize {
        self.verifications.load(Ordering::SeqCst)
    }

    /// Produces a salted digest. Each call draws a fresh salt from the OS RNG.
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| AuthError::Crypto(e.to_string()))
    }

    /// Returns `true` only when `plaintext` matches `digest`. A digest that
    /// does not parse yields `false`, never an error.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        #[cfg(test)]
        self.verifications.fetch_add(1, Ordering::SeqCst);

        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
