//! In-memory user data source - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use agora_core::domain::{NewUser, User, UserProfile, UserProfileUpdate, UserUpdate};
use agora_core::error::RepoError;
use agora_core::ports::UserDataSource;

/// In-memory user store using a HashMap with async RwLock.
///
/// Enforces the same username/email uniqueness as the database indexes.
/// Note: Data is lost on process restart.
pub struct InMemoryUserDataSource {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserDataSource {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserDataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDataSource for InMemoryUserDataSource {
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if store.values().any(|u| u.username == new_user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                new_user.username
            )));
        }
        if store.values().any(|u| u.email == new_user.email) {
            return Err(RepoError::Constraint(format!(
                "email '{}' already exists",
                new_user.email
            )));
        }

        let user = User::new(new_user);
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&user_id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.username == username).cloned())
    }

    async fn get_user_profile_by_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, RepoError> {
        Ok(self.store.read().await.get(&user_id).map(User::profile))
    }

    async fn update_user_by_id(
        &self,
        user_id: Uuid,
        update: UserUpdate,
    ) -> Result<Option<User>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.get_mut(&user_id).map(|user| {
            update.apply_to(user);
            user.clone()
        }))
    }

    async fn update_user_profile_by_id(
        &self,
        user_id: Uuid,
        update: UserProfileUpdate,
    ) -> Result<Option<UserProfile>, RepoError> {
        let user = self.update_user_by_id(user_id, update.into()).await?;
        Ok(user.as_ref().map(User::profile))
    }
}
