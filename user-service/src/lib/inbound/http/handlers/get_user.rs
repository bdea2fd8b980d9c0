use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::access::AuthenticatedIdentity;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Fetch a user record. Only the owner of the record may read it.
pub async fn get_user(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&user_id)
        .map_err(|_| ApiError::BadRequest(format!("invalid input field userID={}", user_id)))?;

    if !user_id.is_assigned() {
        return Err(ApiError::NotFound(format!("User not found: {}", user_id)));
    }

    identity.authorize_owner(&user_id)?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
