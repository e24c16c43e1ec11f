use thiserror::Error;

use crate::domain::errors::StoreError;

/// Authentication and identity resolution failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password. Both look the same to the caller.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    TokenExpired,

    #[error("no user for token subject {0}")]
    UnknownUser(String),

    #[error("Password verification failed: {0}")]
    Password(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
