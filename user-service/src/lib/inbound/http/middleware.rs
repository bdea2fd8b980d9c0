use auth::Authenticator;
use auth::JwtError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::domain::user::access::AuthenticatedIdentity;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Why a request was turned away by the gate. Never shown to the client.
#[derive(Debug, Clone, Error)]
pub enum GateRejection {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("Authorization header is not a bearer token")]
    MalformedHeader,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] JwtError),

    #[error("token has no usable subject")]
    MissingSubject,

    #[error("token was issued to a different user agent")]
    UserAgentMismatch,

    #[error("User-Agent header is not visible ASCII")]
    InvalidUserAgent,
}

impl From<GateRejection> for ApiError {
    fn from(rejection: GateRejection) -> Self {
        ApiError::Unauthenticated(rejection.to_string())
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively; the token itself is taken as is.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, GateRejection> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(GateRejection::MissingHeader)?
        .to_str()
        .map_err(|_| GateRejection::MalformedHeader)?;

    let scheme = value
        .get(..BEARER_PREFIX.len())
        .ok_or(GateRejection::MalformedHeader)?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return Err(GateRejection::MalformedHeader);
    }

    let token = &value[BEARER_PREFIX.len()..];
    if token.is_empty() || token.starts_with(' ') {
        return Err(GateRejection::MalformedHeader);
    }

    Ok(token)
}

/// User-Agent of the request; an absent header reads as empty.
///
/// # Errors
/// * `InvalidUserAgent` - Header carries bytes outside visible ASCII, which
///   could not be compared exactly once decoded
pub fn request_user_agent(headers: &HeaderMap) -> Result<&str, GateRejection> {
    match headers.get(header::USER_AGENT) {
        Some(value) => value.to_str().map_err(|_| GateRejection::InvalidUserAgent),
        None => Ok(""),
    }
}

/// Run every gate check against the request headers at instant `now`.
///
/// # Errors
/// * `MissingHeader` / `MalformedHeader` - No usable bearer token
/// * `InvalidToken` - Bad signature, wrong algorithm, garbage or expired
/// * `MissingSubject` - Subject claim is not a positive user id
/// * `UserAgentMismatch` - Token was issued to another client
/// * `InvalidUserAgent` - Current User-Agent is not text
pub fn verify_request(
    authenticator: &Authenticator,
    headers: &HeaderMap,
    now: DateTime<Utc>,
) -> Result<AuthenticatedIdentity, GateRejection> {
    let token = extract_bearer_token(headers)?;
    let claims = authenticator.validate_token_at(token, now)?;

    let subject = UserId::from_string(&claims.sub).map_err(|_| GateRejection::MissingSubject)?;
    if !subject.is_assigned() {
        return Err(GateRejection::MissingSubject);
    }

    if claims.user_agent != request_user_agent(headers)? {
        return Err(GateRejection::UserAgentMismatch);
    }

    Ok(AuthenticatedIdentity::new(subject, claims.user_agent))
}

/// Gate for protected routes: a request either carries a valid session token
/// for this client or never reaches the handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = verify_request(&state.authenticator, req.headers(), Utc::now())?;

    tracing::debug!(user_id = %identity.subject(), "Request authenticated");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Present on every route behind the gate; absence is a routing bug.
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .ok_or_else(|| {
                ApiError::InternalServerError(
                    "authenticated identity missing from request".to_string(),
                )
            })
    }
}
