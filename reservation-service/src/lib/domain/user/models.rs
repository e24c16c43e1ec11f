use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::PersonNameError;
use crate::domain::user::errors::UserIdError;

/// Registered guest or administrator.
///
/// `password_hash` holds the Argon2 digest. It is never serialized to clients
/// and is blanked on the user returned by a successful authentication.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub is_admin: bool,
}

impl User {
    pub fn without_password(mut self) -> Self {
        self.password_hash.clear();
        self
    }
}

/// Store-assigned user identifier (24-char hex ObjectId)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub ObjectId);

impl UserId {
    /// Parse a user ID from its hex representation.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a 24-character hex ObjectId
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        ObjectId::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// First or last name of a user.
///
/// Must be at least two characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MIN_LENGTH: usize = 2;

    /// Create a validated name.
    ///
    /// # Errors
    /// * `TooShort` - Name shorter than 2 characters
    pub fn new(name: String) -> Result<Self, PersonNameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PersonNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email.clone()))
            .map_err(|_| EmailError::InvalidFormat(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the sign-up policy (at least 7 characters).
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(String);

impl PlainPassword {
    const MIN_LENGTH: usize = 7;

    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(***)")
    }
}

/// User record before the store has assigned it an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub is_admin: bool,
}

impl NewUser {
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            is_admin: self.is_admin,
        }
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password: PlainPassword,
    pub is_admin: bool,
}

impl CreateUserCommand {
    /// Construct a command for a regular (non-admin) guest.
    pub fn guest(
        first_name: PersonName,
        last_name: PersonName,
        email: EmailAddress,
        password: PlainPassword,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password,
            is_admin: false,
        }
    }

    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}

/// Partial update of a user's names.
///
/// Only provided fields are written; email, password and role never change here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserCommand {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
}

impl UpdateUserCommand {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }
}
