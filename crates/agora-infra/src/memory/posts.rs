//! In-memory post data source.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use agora_core::domain::{Post, PostComment, PostLikeOwner, PostOwner};
use agora_core::error::RepoError;
use agora_core::ports::PostDataSource;

/// In-memory post store. Each mutation runs under the write lock, so a
/// post is updated atomically as a whole.
pub struct InMemoryPostDataSource {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostDataSource {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Store prepared posts as-is, keeping their ids and timestamps.
    pub async fn seed(&self, posts: impl IntoIterator<Item = Post>) {
        let mut store = self.store.write().await;
        for post in posts {
            store.insert(post.id, post);
        }
    }

    async fn mutate(&self, post_id: Uuid, f: impl FnOnce(&mut Post) + Send) -> Option<Post> {
        let mut store = self.store.write().await;
        let post = store.get_mut(&post_id)?;
        f(post);
        Some(post.clone())
    }
}

impl Default for InMemoryPostDataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostDataSource for InMemoryPostDataSource {
    async fn create_post(&self, owner: PostOwner, body: String) -> Result<Post, RepoError> {
        let post = Post::new(owner, body);
        self.store.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn get_posts(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn get_post_by_id(&self, post_id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&post_id).cloned())
    }

    async fn like_post(
        &self,
        post_id: Uuid,
        like_owner: PostLikeOwner,
    ) -> Result<Option<Post>, RepoError> {
        Ok(self
            .mutate(post_id, |post| {
                post.add_like(like_owner);
            })
            .await)
    }

    async fn comment_post(
        &self,
        post_id: Uuid,
        comment: PostComment,
    ) -> Result<Option<Post>, RepoError> {
        Ok(self
            .mutate(post_id, |post| post.add_comment(comment))
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn owner(name: &str) -> PostOwner {
        PostOwner {
            id: Uuid::new_v4(),
            name: name.to_string(),
            surname: "Lee".to_string(),
            avatar: String::new(),
        }
    }

    #[tokio::test]
    async fn test_get_posts_newest_first() {
        let posts = InMemoryPostDataSource::new();
        let mut older = Post::new(owner("Ann"), "older".to_string());
        older.created_at = Utc::now() - Duration::days(1);
        let newer = Post::new(owner("Bob"), "newer".to_string());
        posts.seed([older.clone(), newer.clone()]).await;

        let result = posts.get_posts().await.unwrap();

        assert_eq!(result, vec![newer, older]);
    }

    #[tokio::test]
    async fn test_like_missing_post_is_none() {
        let posts = InMemoryPostDataSource::new();

        let result = posts.like_post(Uuid::new_v4(), owner("Ann")).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_likes_by_same_user_land_once() {
        let posts = std::sync::Arc::new(InMemoryPostDataSource::new());
        let post = posts
            .create_post(owner("Ann"), "hello".to_string())
            .await
            .unwrap();
        let post_id = post.id;
        let liker = owner("Bob");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let posts = posts.clone();
                let liker = liker.clone();
                tokio::spawn(async move { posts.like_post(post_id, liker).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = posts.get_post_by_id(post_id).await.unwrap().unwrap();
        assert_eq!(stored.likes, vec![liker]);
    }
}
