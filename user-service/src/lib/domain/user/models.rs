use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use secrecy::ExposeSecret;
use secrecy::SecretString;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered account. `password_hash` is the only form in which
/// the password is ever kept.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user that has not been persisted yet; storage assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
///
/// Identifiers are positive; `0` is never assigned and marks an empty subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not an integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        s.parse::<i64>()
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(format!("{}: {}", s, e)))
    }

    /// Whether this id can refer to a stored user at all.
    pub fn is_assigned(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type, used as the account identifier
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
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
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

/// Plaintext password as received from a client.
///
/// Wrapped in a secret so it never shows up in `Debug` output or logs.
#[derive(Debug)]
pub struct PlainPassword(SecretString);

impl PlainPassword {
    const MIN_LENGTH: usize = 8;
    const SYMBOLS: &'static str = "$@!%*#?&";

    /// Accept a password for signup.
    ///
    /// At least 8 characters drawn from ASCII letters, digits and `$@!%*#?&`,
    /// with at least one of each class.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `InvalidCharacters` - Character outside the allowed set
    /// * `MissingLetter` / `MissingDigit` / `MissingSymbol` - Class not present
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        if !password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || Self::SYMBOLS.contains(c))
        {
            return Err(PasswordPolicyError::InvalidCharacters);
        }
        if !password.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(PasswordPolicyError::MissingLetter);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        if !password.chars().any(|c| Self::SYMBOLS.contains(c)) {
            return Err(PasswordPolicyError::MissingSymbol);
        }

        Ok(Self(SecretString::new(password)))
    }

    /// Accept a password as typed at login, without the signup policy.
    pub fn for_login(password: String) -> Self {
        Self(SecretString::new(password))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Command to register a new account
#[derive(Debug)]
pub struct SignupCommand {
    pub email: EmailAddress,
    pub password: PlainPassword,
}

impl SignupCommand {
    pub fn new(email: EmailAddress, password: PlainPassword) -> Self {
        Self { email, password }
    }
}

/// Command to exchange credentials for a session token
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: PlainPassword,
    /// User-Agent of the requesting client, bound into the issued token
    pub user_agent: String,
}

/// Successful login: the token and the account it was issued for.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}
