use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PlainPassword;
use crate::domain::user::models::SignupCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;

pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = body?;
    state
        .user_service
        .signup(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for signup (raw JSON). Not `Debug`: it holds plaintext.
#[derive(Deserialize)]
pub struct SignupRequest {
    email: String,
    password: String,
    confirm_password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, ParseSignupRequestError> {
        let email = EmailAddress::new(self.email)?;
        if self.password != self.confirm_password {
            return Err(PasswordPolicyError::ConfirmationMismatch.into());
        }
        let password = PlainPassword::new(self.password)?;
        Ok(SignupCommand::new(email, password))
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str, confirm_password: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        let command = request("u1@example.com", "Secr3t!1", "Secr3t!1")
            .try_into_command()
            .unwrap();
        assert_eq!(command.email.as_str(), "u1@example.com");
        assert_eq!(command.password.expose(), "Secr3t!1");
    }

    #[test]
    fn test_confirmation_mismatch() {
        let result = request("u1@example.com", "Secr3t!1", "Secr3t!2").try_into_command();
        assert!(matches!(
            result,
            Err(ParseSignupRequestError::Password(
                PasswordPolicyError::ConfirmationMismatch
            ))
        ));
    }

    #[test]
    fn test_invalid_email_and_weak_password() {
        assert!(matches!(
            request("u1", "Secr3t!1", "Secr3t!1").try_into_command(),
            Err(ParseSignupRequestError::Email(_))
        ));
        assert!(matches!(
            request("u1@example.com", "secret11", "secret11").try_into_command(),
            Err(ParseSignupRequestError::Password(
                PasswordPolicyError::MissingSymbol
            ))
        ));
    }
}
