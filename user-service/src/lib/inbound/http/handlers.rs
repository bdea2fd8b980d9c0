use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::User;
use crate::user::errors::AccessError;
use crate::user::errors::UserError;

pub mod get_user;
pub mod healthcheck;
pub mod login;
pub mod signup;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Failure outcome of a request.
///
/// The payload of `InternalServerError`, `Unauthenticated`, `WrongCredentials`
/// and `Forbidden` is a diagnostic for the server log only; the client gets a
/// fixed message per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Unauthenticated(String),
    WrongCredentials(String),
    Forbidden(String),
}

impl ApiError {
    pub const INTERNAL_SERVER_ERROR_MESSAGE: &'static str = "something went wrong";
    pub const UNAUTHENTICATED_MESSAGE: &'static str = "please log in";
    pub const WRONG_CREDENTIALS_MESSAGE: &'static str = "wrong credentials";
    pub const FORBIDDEN_MESSAGE: &'static str = "permission denied";
    pub const INVALID_JSON_MESSAGE: &'static str = "invalid JSON";
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::INTERNAL_SERVER_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthenticated(detail) => {
                tracing::debug!(reason = %detail, "Unable to verify session token");
                (
                    StatusCode::UNAUTHORIZED,
                    Self::UNAUTHENTICATED_MESSAGE.to_string(),
                )
            }
            ApiError::WrongCredentials(detail) => {
                tracing::debug!(reason = %detail, "Wrong credentials");
                (
                    StatusCode::UNAUTHORIZED,
                    Self::WRONG_CREDENTIALS_MESSAGE.to_string(),
                )
            }
            ApiError::Forbidden(detail) => {
                tracing::debug!(reason = %detail, "Permission denied");
                (StatusCode::FORBIDDEN, Self::FORBIDDEN_MESSAGE.to_string())
            }
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::BadRequest("user already exists".to_string()),
            UserError::InvalidUserId(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => ApiError::BadRequest(err.to_string()),
            UserError::InvalidCredentials => ApiError::WrongCredentials(err.to_string()),
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        ApiError::BadRequest(Self::INVALID_JSON_MESSAGE.to_string())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::Forbidden(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Public view of a user; the password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::UserId;

    #[test]
    fn test_user_errors_map_to_status_classes() {
        let cases = [
            (UserError::NotFound("1".to_string()), StatusCode::NOT_FOUND),
            (
                UserError::EmailAlreadyExists("u1@example.com".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                UserError::DatabaseError("connection refused".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_access_error_is_forbidden() {
        let err = AccessError::NotOwner {
            subject: UserId(1),
            owner: UserId(2),
        };

        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_diagnostics_are_not_echoed() {
        let err = ApiError::InternalServerError("password=hunter2 at db.internal:5432".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"error":"something went wrong"}"#);
    }
}
