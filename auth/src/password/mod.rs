pub mod argon2;
pub mod errors;

pub use argon2::Argon2Hasher;
pub use errors::PasswordError;

/// Salted, adaptive password hashing.
///
/// Implementations must produce digests that embed their own salt and
/// parameters, so `verify` needs nothing but the digest and the candidate.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing digest.
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Check a plaintext candidate against a stored digest.
    ///
    /// A mismatch is `Ok(false)`; errors are reserved for digests that cannot be parsed.
    fn verify(&self, digest: &str, password: &str) -> Result<bool, PasswordError>;
}
