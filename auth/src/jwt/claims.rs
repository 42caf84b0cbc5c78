use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token claims.
///
/// Carries the subject's numeric id and an absolute expiry. Decoding into
/// this struct is the only way claims leave the codec, so a token missing
/// either field is rejected as malformed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub user_id: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a user, valid for `ttl` from now.
    ///
    /// # Arguments
    /// * `user_id` - Subject identifier
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with user_id, exp, and iat set
    pub fn for_user(user_id: i64, ttl: Duration) -> Self {
        Self::issued_at(user_id, Utc::now(), ttl)
    }

    /// Create claims for a user as if issued at `issued_at`.
    pub fn issued_at(user_id: i64, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id,
            exp: (issued_at + ttl).timestamp(),
            iat: issued_at.timestamp(),
        }
    }

    /// Absolute expiry instant.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
