//! Authentication utilities for the reservation service.
//!
//! - Password hashing behind the [`PasswordHasher`] trait (Argon2id by default)
//! - Stateless, HS256-signed bearer tokens carrying a user id and an absolute expiry
//! - An [`Authenticator`] that ties the two together for the login flow
//!
//! Token validation stops at the signature: expiry is reported by
//! [`Claims::is_expired`] and enforced by whoever consumes the claims.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{Argon2Hasher, PasswordHasher};
//!
//! let hasher = Argon2Hasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&digest, "my_password").unwrap());
//! ```
//!
//! ## Issuing and validating tokens
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(3));
//! let issued = auth.issue_token("65f1c0ffee", Some("alice@example.com".to_string())).unwrap();
//! let claims = auth.validate_token(&issued.token).unwrap();
//! assert_eq!(claims.id, "65f1c0ffee");
//! assert!(!claims.is_expired(chrono::Utc::now().timestamp()));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::Argon2Hasher;
pub use password::PasswordError;
pub use password::PasswordHasher;
