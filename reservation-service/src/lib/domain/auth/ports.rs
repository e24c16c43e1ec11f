use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::Session;
use crate::domain::user::models::User;

/// Port for login and bearer-token identity resolution.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check credentials and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Store` - Store operation failed
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Resolve the user a token was issued to.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, algorithm, payload or subject id
    /// * `TokenExpired` - Current time is past the embedded expiry
    /// * `UnknownUser` - Subject no longer exists
    /// * `Store` - Store operation failed
    async fn identify(&self, token: &str) -> Result<User, AuthError>;
}
