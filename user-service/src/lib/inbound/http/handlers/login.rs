use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::PlainPassword;
use crate::inbound::http::middleware::request_user_agent;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;
    // Only a text User-Agent can be bound into the token.
    let user_agent = request_user_agent(&headers)
        .map_err(|e| ApiError::BadRequest(format!("invalid input: {}", e)))?
        .to_string();

    // A malformed email can't belong to any account.
    let email = EmailAddress::new(body.email)
        .map_err(|e| ApiError::WrongCredentials(e.to_string()))?;

    let command = LoginCommand {
        email,
        password: PlainPassword::for_login(body.password),
        user_agent,
    };

    state
        .user_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|ref outcome| ApiSuccess::new(StatusCode::OK, outcome.into()))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserData,
}

impl From<&LoginOutcome> for LoginResponseData {
    fn from(outcome: &LoginOutcome) -> Self {
        Self {
            token: outcome.token.clone(),
            expires_at: outcome.expires_at,
            user: (&outcome.user).into(),
        }
    }
}
