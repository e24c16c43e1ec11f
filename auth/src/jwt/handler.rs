use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Signs and verifies reservation tokens with a shared HMAC secret.
///
/// Only HS256 is accepted on the way in. Expiry is not checked here:
/// [`JwtHandler::verify`] returns the raw claims and leaves the
/// `expires` comparison to the caller.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create a handler for the given secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - It is read once from configuration and never changes afterwards
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign claims into a compact token string.
    ///
    /// # Errors
    /// * `SigningFailed` - Serialization or signing failed
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Self::ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Verify the signature and algorithm of a token and return its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed token, wrong algorithm, bad signature,
    ///   or claims that do not match [`Claims`]
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}
