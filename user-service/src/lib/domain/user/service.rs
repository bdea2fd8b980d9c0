use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for signup, login and user lookup.
///
/// Argon2 work is moved onto the blocking thread pool; it is slow on purpose
/// and would otherwise hold up the async workers serving other requests.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<User, UserError> {
        let SignupCommand { email, password } = command;

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        let created_user = self
            .repository
            .create(NewUser {
                email,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(user_id = %created_user.id, "User signed up");

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        let LoginCommand {
            email,
            password,
            user_agent,
        } = command;

        let authenticator = Arc::clone(&self.authenticator);

        let Some(user) = self.repository.find_by_email(&email).await? else {
            tokio::task::spawn_blocking(move || {
                authenticator.reject_unknown_identity(password.expose())
            })
            .await
            .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

            tracing::debug!("Login rejected: no account for the given email");
            return Err(UserError::InvalidCredentials);
        };

        let stored_hash = user.password_hash.clone();
        let subject = user.id.to_string();
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(
                password.expose(),
                &stored_hash,
                &subject,
                &user_agent,
                Utc::now(),
            )
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
                UserError::InvalidCredentials
            }
            AuthenticationError::PasswordError(err) => UserError::Password(err),
            AuthenticationError::JwtError(err) => UserError::Token(err),
        })?;

        tracing::info!(user_id = %user.id, expires_at = %result.expires_at, "Session token issued");

        Ok(LoginOutcome {
            token: result.access_token,
            expires_at: result.expires_at,
            user,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
