use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::Session;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::errors::StoreError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Login and token resolution backed by the user store.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            users,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let Ok(email) = EmailAddress::new(credentials.email.clone()) else {
            return Err(AuthError::InvalidCredentials);
        };

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let issued = self
            .authenticator
            .authenticate(
                &credentials.password,
                &user.password_hash,
                user.id,
                Some(user.email.to_string()),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
                AuthenticationError::PasswordError(e) => AuthError::Password(e.to_string()),
                AuthenticationError::JwtError(e) => AuthError::Signing(e.to_string()),
            })?;

        tracing::info!(user_id = %user.id, "User authenticated");
        Ok(Session {
            user: user.without_password(),
            token: issued.token,
        })
    }

    async fn identify(&self, token: &str) -> Result<User, AuthError> {
        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(AuthError::TokenExpired);
        }

        let user_id =
            UserId::from_string(&claims.id).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        match self.users.find_by_id(&user_id).await {
            Ok(user) => Ok(user),
            Err(StoreError::NotFound { id, .. }) => Err(AuthError::UnknownUser(id)),
            Err(e) => Err(AuthError::Store(e)),
        }
    }
}
