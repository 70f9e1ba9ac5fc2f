//! Authentication use cases: signup, login, logout and token checks.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewUser, User, UserProfile, UserUpdate};
use crate::error::{DomainError, RepoError, UserOperation};
use crate::ports::{PasswordService, TokenService, UserDataSource};

const MIN_PASSWORD_LEN: usize = 8;

/// Credentials issued by a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_in: i64,
    pub user: UserProfile,
}

pub struct AuthenticationService {
    users: Arc<dyn UserDataSource>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthenticationService {
    pub fn new(
        users: Arc<dyn UserDataSource>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new, logged-out user.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, DomainError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::Validation("Username is required".to_string()));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let existing = self
            .users
            .get_user_by_username(username)
            .await
            .map_err(|cause| {
                tracing::warn!(%username, error = %cause, "Looking up username failed");
                DomainError::GettingUser { cause }
            })?;
        if existing.is_some() {
            return Err(DomainError::UsernameTaken {
                username: username.to_string(),
            });
        }

        let password = self.passwords.hash(password)?;
        let user = self
            .users
            .create_user(NewUser {
                username: username.to_string(),
                password,
                email: email.to_string(),
            })
            .await
            .map_err(|cause| match cause {
                // Unique indexes still fire for a taken email or a racing signup.
                RepoError::Constraint(_) => {
                    tracing::debug!(%username, error = %cause, "Rejected duplicate user");
                    DomainError::UserExists {
                        username: username.to_string(),
                        cause,
                    }
                }
                cause => {
                    tracing::warn!(%username, error = %cause, "Creating user failed");
                    DomainError::CreatingUser {
                        username: username.to_string(),
                        cause,
                    }
                }
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user.profile())
    }

    /// Verify credentials, issue a token and persist it on the user.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, DomainError> {
        let user = self
            .users
            .get_user_by_username(username.trim())
            .await
            .map_err(|cause| {
                tracing::warn!(error = %cause, "Loading user for login failed");
                DomainError::GettingUser { cause }
            })?
            .ok_or(DomainError::InvalidCredentials)?;

        if !self.passwords.verify(password, &user.password)? {
            tracing::debug!(user_id = %user.id, "Rejected login with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.tokens.generate_token(user.id, &user.username)?;
        let user = self
            .update_user(user.id, UserUpdate::with_token(token.clone()), UserOperation::Login)
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(Session {
            token,
            expires_in: self.tokens.expiration_seconds(),
            user: user.profile(),
        })
    }

    /// Clear the stored session token of `user_id`.
    pub async fn logout(&self, user_id: Uuid) -> Result<User, DomainError> {
        let user = self
            .update_user(user_id, UserUpdate::clear_token(), UserOperation::Logout)
            .await?;

        tracing::info!(%user_id, "User logged out");
        Ok(user)
    }

    /// Resolve the user owning `token`.
    ///
    /// The token must be valid and still be the one stored on the user, so a
    /// token stops working as soon as its owner logs out.
    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.tokens.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Token validation failed");
            DomainError::InvalidCredentials
        })?;

        let user = self
            .users
            .get_user_by_id(claims.user_id)
            .await
            .map_err(|cause| {
                tracing::warn!(
                    user_id = %claims.user_id,
                    error = %cause,
                    "Loading authenticated user failed"
                );
                DomainError::GettingUser { cause }
            })?
            .ok_or(DomainError::InvalidCredentials)?;

        if !user.is_logged_in() || user.token != token {
            return Err(DomainError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn update_user(
        &self,
        user_id: Uuid,
        update: UserUpdate,
        operation: UserOperation,
    ) -> Result<User, DomainError> {
        let updated = self
            .users
            .update_user_by_id(user_id, update)
            .await
            .and_then(|user| user.ok_or(RepoError::NotFound));

        updated.map_err(|cause| {
            tracing::warn!(%user_id, %operation, error = %cause, "Updating user failed");
            DomainError::UpdatingUser {
                user_id,
                operation,
                cause,
            }
        })
    }
}
