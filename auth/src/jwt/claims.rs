use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by a reservation bearer token.
///
/// Field names match the wire format (`id`, `email`, `expires`, `issuedAt`),
/// so tokens stay readable by clients that inspect the payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the user the token was issued to.
    pub id: String,

    /// Email of the user, carried for convenience only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Absolute expiry (Unix timestamp, seconds).
    pub expires: i64,

    /// Issuance time (Unix timestamp, seconds).
    #[serde(rename = "issuedAt", default)]
    pub issued_at: i64,
}

impl Claims {
    /// Build claims for a user, issued now and valid for `ttl`.
    pub fn for_user(user_id: impl ToString, email: Option<String>, ttl: Duration) -> Self {
        Self::issued_at(user_id, email, ttl, Utc::now())
    }

    /// Build claims for a user as if issued at `now`.
    ///
    /// # Arguments
    /// * `user_id` - User identifier (stored in `id`)
    /// * `email` - Optional email address
    /// * `ttl` - Lifetime added to `now` to get the expiry
    /// * `now` - Issuance instant
    pub fn issued_at(
        user_id: impl ToString,
        email: Option<String>,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: user_id.to_string(),
            email,
            expires: (now + ttl).timestamp(),
            issued_at: now.timestamp(),
        }
    }

    /// True once `current_timestamp` is strictly past the embedded expiry.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.expires
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires, 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_for_user_sets_expiry_from_ttl() {
        let claims = Claims::for_user("user123", Some("a@b.com".to_string()), Duration::hours(3));

        assert_eq!(claims.id, "user123");
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
        assert_eq!(claims.expires - claims.issued_at, 3 * 60 * 60);
    }

    #[test]
    fn test_issued_at_is_deterministic() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let claims = Claims::issued_at("u1", None, Duration::minutes(10), now);

        assert_eq!(claims.issued_at, now.timestamp());
        assert_eq!(claims.expires, now.timestamp() + 600);
        assert_eq!(claims.expires_at(), Some(now + Duration::minutes(10)));
    }

    #[test]
    fn test_is_expired() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let claims = Claims::issued_at("u1", None, Duration::seconds(100), now);
        let exp = claims.expires;

        assert!(!claims.is_expired(exp - 1));
        assert!(!claims.is_expired(exp)); // Exactly at expiry is still valid
        assert!(claims.is_expired(exp + 1));
    }

    #[test]
    fn test_wire_names() {
        let claims = Claims {
            id: "abc".to_string(),
            email: None,
            expires: 10,
            issued_at: 5,
        };
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["id"], "abc");
        assert_eq!(json["expires"], 10);
        assert_eq!(json["issuedAt"], 5);
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_missing_issued_at_defaults_to_zero() {
        let claims: Claims =
            serde_json::from_str(r#"{"id":"abc","email":"a@b.com","expires":42}"#).unwrap();

        assert_eq!(claims.issued_at, 0);
        assert_eq!(claims.expires, 42);
    }
}
