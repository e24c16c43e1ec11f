use thiserror::Error;

/// Error type for token signing and validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    /// Bad signature, unexpected algorithm, or a payload that does not parse.
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
