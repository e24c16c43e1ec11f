use crate::domain::user::models::User;

/// Email and password pair submitted at login.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Result of a successful login: the user (digest blanked) and a signed token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}
