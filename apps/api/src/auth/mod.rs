//! Authentication — password hashing, session tokens, the register/login
//! flow and the bearer-token gate in front of protected routes.

pub mod handlers;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

use thiserror::Error;

use crate::store::StoreError;

pub use middleware::require_auth;
pub use password::PasswordHasher;
pub use service::AuthService;
pub use token::{Claims, SigningSecret, TokenService};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    Conflict,

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("No valid access token")]
    Unauthenticated,

    #[error("Cryptographic operation failed: {0}")]
    Crypto(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AuthError::Conflict,
            StoreError::Unavailable(detail) => AuthError::StoreUnavailable(detail),
        }
    }
}
