use crate::domain::user::models::UserId;
use crate::user::errors::AccessError;

/// Identity proven by a valid session token for the duration of one request.
///
/// Only the request gate constructs it; handlers read it and never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    subject: UserId,
    user_agent: String,
}

impl AuthenticatedIdentity {
    pub fn new(subject: UserId, user_agent: impl Into<String>) -> Self {
        Self {
            subject,
            user_agent: user_agent.into(),
        }
    }

    pub fn subject(&self) -> UserId {
        self.subject
    }

    /// User-Agent the token was issued to (equal to the current request's).
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Owner-only policy: the caller may only reach resources it owns.
    ///
    /// # Errors
    /// * `NotOwner` - `owner` is a different user than the caller
    pub fn authorize_owner(&self, owner: &UserId) -> Result<(), AccessError> {
        if self.subject == *owner {
            Ok(())
        } else {
            Err(AccessError::NotOwner {
                subject: self.subject,
                owner: *owner,
            })
        }
    }
}
