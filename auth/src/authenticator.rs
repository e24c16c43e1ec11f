use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::Argon2Hasher;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the signing secret (through its [`JwtHandler`]) and the token lifetime;
/// both are fixed at construction.
pub struct Authenticator {
    password_hasher: Box<dyn PasswordHasher>,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator backed by Argon2id.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self::with_hasher(jwt_secret, token_ttl, Argon2Hasher::new())
    }

    /// Create an authenticator with a custom password hasher.
    pub fn with_hasher(
        jwt_secret: &[u8],
        token_ttl: Duration,
        password_hasher: impl PasswordHasher + 'static,
    ) -> Self {
        Self {
            password_hasher: Box::new(password_hasher),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored digest and, on success, issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored digest is unreadable
    /// * `JwtError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_digest: &str,
        user_id: impl ToString,
        email: Option<String>,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(stored_digest, password)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(user_id, email)?)
    }

    /// Issue a token for a user without checking a password.
    pub fn issue_token(
        &self,
        user_id: impl ToString,
        email: Option<String>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_user(user_id, email, self.token_ttl);
        self.sign(claims)
    }

    /// Sign an arbitrary claim set, e.g. one with a back-dated issuance time.
    pub fn sign(&self, claims: Claims) -> Result<IssuedToken, JwtError> {
        let token = self.jwt_handler.sign(&claims)?;
        Ok(IssuedToken { token, claims })
    }

    /// Check a token's signature and return its claims. Expiry is not checked.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }
}
