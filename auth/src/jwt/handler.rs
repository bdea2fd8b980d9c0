use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for issuing and parsing session tokens.
///
/// Tokens are signed with HS512 (HMAC with SHA-512). The algorithm is fixed:
/// a token whose header names any other algorithm is rejected before its
/// signature is even computed.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes)
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS512,
        }
    }

    /// Issue a signed token for `subject`, bound to the client's user agent.
    ///
    /// # Arguments
    /// * `subject` - User identifier placed in the `sub` claim
    /// * `user_agent` - User-Agent header of the requesting client
    /// * `now` - Issuance instant; expiry is `now + TOKEN_TTL_SECS`
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        user_agent: &str,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        self.encode(&Claims::new(subject, user_agent, now))
    }

    /// Sign arbitrary claims.
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Parse and validate a token against the current time.
    pub fn parse(&self, token: &str) -> Result<Claims, JwtError> {
        self.parse_at(token, Utc::now())
    }

    /// Parse and validate a token against `now`.
    ///
    /// The signature is verified before any claim is deserialized; expiry is
    /// only looked at once the claims are known to be authentic.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature, algorithm or key mismatch
    /// * `Malformed` - Not a decodable token, or claims of the wrong shape
    /// * `Expired` - `now` is at or past the `exp` claim
    pub fn parse_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation())?;

        let claims = token_data.claims;
        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against the caller's clock in `parse_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}
