//! Post use cases: listing, liking and commenting.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostComment, PostCommentOwner, PostLikeOwner, PostOwner};
use crate::error::{DomainError, RepoError};
use crate::ports::PostDataSource;

pub struct PostService {
    posts: Arc<dyn PostDataSource>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostDataSource>) -> Self {
        Self { posts }
    }

    pub async fn create_post(&self, owner: PostOwner, body: &str) -> Result<Post, DomainError> {
        let body = non_empty_body(body)?;
        let owner_id = owner.id;

        let post = self
            .posts
            .create_post(owner, body)
            .await
            .map_err(|cause| {
                tracing::warn!(%owner_id, error = %cause, "Creating post failed");
                DomainError::CreatingPost { owner_id, cause }
            })?;

        tracing::info!(post_id = %post.id, %owner_id, "Post created");
        Ok(post)
    }

    /// Every persisted post, newest first.
    pub async fn get_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.posts.get_posts().await.map_err(|cause| {
            tracing::warn!(error = %cause, "Retrieving posts failed");
            DomainError::GettingPosts { cause }
        })
    }

    pub async fn get_post_by_id(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.fetch_existing(post_id).await
    }

    /// Add a like by `like_owner` to the post.
    ///
    /// Liking a post twice leaves it unchanged.
    pub async fn like_post(
        &self,
        post_id: Uuid,
        like_owner: PostLikeOwner,
    ) -> Result<Post, DomainError> {
        let post = self.fetch_existing(post_id).await?;
        let liker_id = like_owner.id;

        if post.is_liked_by(liker_id) {
            tracing::debug!(%post_id, %liker_id, "Post already liked by user");
            return Ok(post);
        }

        let liked = self
            .posts
            .like_post(post_id, like_owner)
            .await
            .and_then(|post| post.ok_or(RepoError::NotFound))
            .map_err(|cause| {
                tracing::warn!(%post_id, %liker_id, error = %cause, "Liking post failed");
                DomainError::LikingPost {
                    post_id,
                    liker_id,
                    cause,
                }
            })?;

        tracing::info!(%post_id, %liker_id, likes = liked.likes.len(), "Post liked");
        Ok(liked)
    }

    /// Append a comment by `owner` to the post.
    pub async fn comment_post(
        &self,
        post_id: Uuid,
        owner: PostCommentOwner,
        body: &str,
    ) -> Result<Post, DomainError> {
        let body = non_empty_body(body)?;
        self.fetch_existing(post_id).await?;
        let owner_id = owner.id;

        let commented = self
            .posts
            .comment_post(post_id, PostComment::new(owner, body))
            .await
            .and_then(|post| post.ok_or(RepoError::NotFound))
            .map_err(|cause| {
                tracing::warn!(%post_id, %owner_id, error = %cause, "Commenting post failed");
                DomainError::CommentingPost {
                    post_id,
                    owner_id,
                    cause,
                }
            })?;

        tracing::info!(%post_id, %owner_id, "Post commented");
        Ok(commented)
    }

    async fn fetch_existing(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .get_post_by_id(post_id)
            .await
            .map_err(|cause| {
                tracing::warn!(%post_id, error = %cause, "Retrieving post failed");
                DomainError::GettingPost { post_id, cause }
            })?
            .ok_or(DomainError::PostNotFound { post_id })
    }
}

fn non_empty_body(body: &str) -> Result<String, DomainError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(DomainError::Validation("Body must not be empty".to_string()));
    }
    Ok(body.to_string())
}
