//! User profile use cases.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{UserProfile, UserProfileUpdate};
use crate::error::{DomainError, RepoError, UserOperation};
use crate::ports::UserDataSource;

pub struct UserService {
    users: Arc<dyn UserDataSource>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserDataSource>) -> Self {
        Self { users }
    }

    pub async fn get_user_profile(&self, user_id: Uuid) -> Result<UserProfile, DomainError> {
        self.users
            .get_user_profile_by_id(user_id)
            .await
            .map_err(|cause| {
                tracing::warn!(%user_id, error = %cause, "Reading user profile failed");
                DomainError::GettingUser { cause }
            })?
            .ok_or(DomainError::UserNotFound { user_id })
    }

    pub async fn update_user_profile(
        &self,
        user_id: Uuid,
        update: UserProfileUpdate,
    ) -> Result<UserProfile, DomainError> {
        if update.is_empty() {
            return Err(DomainError::Validation(
                "At least one of name, surname or avatar is required".to_string(),
            ));
        }

        self.users
            .update_user_profile_by_id(user_id, update)
            .await
            .and_then(|profile| profile.ok_or(RepoError::NotFound))
            .map_err(|cause| {
                tracing::warn!(%user_id, error = %cause, "Updating user profile failed");
                DomainError::UpdatingUser {
                    user_id,
                    operation: UserOperation::Profile,
                    cause,
                }
            })
    }
}
