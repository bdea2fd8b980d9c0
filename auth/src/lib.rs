//! Session authentication primitives
//!
//! Stateless building blocks for login and request authentication:
//! - Password hashing (Argon2id)
//! - Session token issuance and parsing (HS512 JWT, fixed one hour lifetime)
//! - Authentication coordination
//!
//! Nothing here touches storage or HTTP. Services own the lookup of stored
//! credentials and the transport of tokens.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Utc;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue("42", "Mozilla/5.0", Utc::now()).unwrap();
//! let claims = handler.parse(&token).unwrap();
//! assert_eq!(claims.sub, "42");
//! assert_eq!(claims.user_agent, "Mozilla/5.0");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Utc;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Signup: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth
//!     .authenticate("password123", &hash, "42", "Mozilla/5.0", Utc::now())
//!     .unwrap();
//!
//! // Protected request: validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "42");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TOKEN_TTL_SECS;
pub use password::PasswordError;
pub use password::PasswordHasher;
