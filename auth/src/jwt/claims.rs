use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime of every issued token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Claims carried by a session token.
///
/// Every field is required; a token whose payload does not match this shape
/// fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// User-Agent of the client the token was issued to
    pub user_agent: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, expiring `TOKEN_TTL_SECS` after `issued_at`.
    pub fn new(
        subject: impl ToString,
        user_agent: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let expiration = issued_at + Duration::seconds(TOKEN_TTL_SECS);

        Self {
            sub: subject.to_string(),
            user_agent: user_agent.into(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Expiration as a UTC instant.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// A token is usable strictly before its expiration second.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
