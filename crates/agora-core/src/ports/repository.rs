//! Data source ports.
//!
//! Each method issues one store operation and returns the mapped domain
//! value. Absence is `Ok(None)`; store failures are returned unchanged as
//! [`RepoError`] and classified by the calling service.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    NewUser, Post, PostComment, PostLikeOwner, PostOwner, User, UserProfile, UserProfileUpdate,
    UserUpdate,
};
use crate::error::RepoError;

/// User persistence operations.
#[async_trait]
pub trait UserDataSource: Send + Sync {
    /// Persist a new, logged-out user.
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepoError>;

    async fn get_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, RepoError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn get_user_profile_by_id(&self, user_id: Uuid)
    -> Result<Option<UserProfile>, RepoError>;

    /// Apply a partial update and return the stored result.
    async fn update_user_by_id(
        &self,
        user_id: Uuid,
        update: UserUpdate,
    ) -> Result<Option<User>, RepoError>;

    async fn update_user_profile_by_id(
        &self,
        user_id: Uuid,
        update: UserProfileUpdate,
    ) -> Result<Option<UserProfile>, RepoError>;
}

/// Post persistence operations.
#[async_trait]
pub trait PostDataSource: Send + Sync {
    async fn create_post(&self, owner: PostOwner, body: String) -> Result<Post, RepoError>;

    /// All posts, newest first.
    async fn get_posts(&self) -> Result<Vec<Post>, RepoError>;

    async fn get_post_by_id(&self, post_id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Append `like_owner` to the like set in a single store operation.
    ///
    /// When the owner already likes the post, the stored post is returned
    /// unchanged.
    async fn like_post(
        &self,
        post_id: Uuid,
        like_owner: PostLikeOwner,
    ) -> Result<Option<Post>, RepoError>;

    /// Append a comment in a single store operation.
    async fn comment_post(
        &self,
        post_id: Uuid,
        comment: PostComment,
    ) -> Result<Option<Post>, RepoError>;
}
