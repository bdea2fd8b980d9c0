use std::sync::OnceLock;

use chrono::DateTime;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the signing secret for the lifetime of the process; share it behind
/// an `Arc`, it is never mutated after construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    decoy_hash: OnceLock<Option<String>>,
}

const DECOY_PASSWORD: &str = "decoy-password-never-assigned";

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Instant after which the token is refused
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token bound to `user_agent`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identifier placed in the token's `sub` claim
    /// * `user_agent` - User-Agent of the client logging in
    /// * `now` - Issuance instant
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be checked
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        user_agent: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let claims = Claims::new(subject, user_agent, now);
        let access_token = self.jwt_handler.encode(&claims)?;
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| JwtError::EncodingFailed("expiry out of range".to_string()))?;

        Ok(AuthenticationResult {
            access_token,
            expires_at,
        })
    }

    /// Refuse a login for an identifier with no stored credential.
    ///
    /// Runs a full verification against a decoy hash first so the refusal
    /// costs as much as a wrong password does.
    pub fn reject_unknown_identity(&self, password: &str) -> AuthenticationError {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).ok());
        if let Some(hash) = decoy {
            let _ = self.password_hasher.verify(password, hash);
        }
        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        subject: &str,
        user_agent: &str,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, user_agent, now)
    }

    /// Validate and decode a token against the current time.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.parse(token)
    }

    /// Validate and decode a token against `now`.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, JwtError> {
        self.jwt_handler.parse_at(token, now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET);
        let now = Utc::now();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &hash, "123", "Mozilla/5.0", now)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert!(result.expires_at > now);
        assert!(result.expires_at <= now + Duration::hours(1));

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "123");
        assert_eq!(decoded.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, "123", "ua", Utc::now());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_hash() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.authenticate("password", "plaintext", "123", "ua", Utc::now());
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(PasswordError::MalformedHash(_)))
        ));
    }

    #[test]
    fn test_reject_unknown_identity_runs_verification() {
        let authenticator = Authenticator::new(SECRET);
        assert!(authenticator.decoy_hash.get().is_none());

        let err = authenticator.reject_unknown_identity("my_password");
        assert!(matches!(err, AuthenticationError::InvalidCredentials));

        let decoy = authenticator.decoy_hash.get().unwrap().as_ref().unwrap();
        assert!(decoy.starts_with("$argon2id$"));

        // The decoy password itself is refused too.
        let err = authenticator.reject_unknown_identity(DECOY_PASSWORD);
        assert!(matches!(err, AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = Authenticator::new(SECRET);
        let now = Utc::now();

        let token = authenticator
            .issue_token("7", "ua", now)
            .expect("Failed to generate token");

        let decoded = authenticator
            .validate_token_at(&token, now)
            .expect("Failed to validate token");
        assert_eq!(decoded.sub, "7");

        let expired = authenticator.validate_token_at(&token, now + Duration::hours(2));
        assert!(matches!(expired, Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
