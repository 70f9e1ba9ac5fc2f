//! Hand-rolled data source and auth fakes for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::{
    NewUser, Post, PostComment, PostLikeOwner, PostOwner, User, UserProfile, UserProfileUpdate,
    UserUpdate,
};
use crate::error::RepoError;
use crate::ports::{
    AuthError, PasswordService, PostDataSource, TokenClaims, TokenService, UserDataSource,
};

#[derive(Default)]
pub struct FakeUserDataSource {
    users: Mutex<HashMap<Uuid, User>>,
    update_failure: Mutex<Option<String>>,
}

impl FakeUserDataSource {
    pub fn insert_with_token(&self, username: &str, token: &str) -> User {
        let mut user = User::new(NewUser {
            username: username.to_string(),
            password: format!("hashed:{username}"),
            email: format!("{username}@example.com"),
        });
        user.token = token.to_string();
        self.users.lock().unwrap().insert(user.id, user.clone());
        user
    }

    pub fn stored(&self, user_id: Uuid) -> Option<User> {
        self.users.lock().unwrap().get(&user_id).cloned()
    }

    pub fn fail_updates(&self, message: &str) {
        *self.update_failure.lock().unwrap() = Some(message.to_string());
    }

    fn update_error(&self) -> Option<RepoError> {
        self.update_failure
            .lock()
            .unwrap()
            .clone()
            .map(RepoError::Query)
    }
}

#[async_trait]
impl UserDataSource for FakeUserDataSource {
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == new_user.email) {
            return Err(RepoError::Constraint(format!(
                "email '{}' already exists",
                new_user.email
            )));
        }
        let user = User::new(new_user);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.stored(user_id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn get_user_profile_by_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, RepoError> {
        Ok(self.stored(user_id).map(|u| u.profile()))
    }

    async fn update_user_by_id(
        &self,
        user_id: Uuid,
        update: UserUpdate,
    ) -> Result<Option<User>, RepoError> {
        if let Some(err) = self.update_error() {
            return Err(err);
        }
        let mut users = self.users.lock().unwrap();
        Ok(users.get_mut(&user_id).map(|user| {
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
        Ok(user.map(|u| u.profile()))
    }
}

/// Which post data source call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFailure {
    GetPosts,
    GetPostById,
    LikePost,
    CommentPost,
}

#[derive(Default)]
pub struct FakePostDataSource {
    posts: Mutex<Vec<Post>>,
    failure: Mutex<Option<PostFailure>>,
    mutations: Mutex<usize>,
}

impl FakePostDataSource {
    /// Store a post created an hour ago with `likes` existing likes.
    pub fn insert_post(&self, likes: usize) -> Post {
        let created = Utc::now() - Duration::hours(1);
        let mut post = Post::new(owner("Owner"), "A post body".to_string());
        post.created_at = created;
        post.updated_at = created;
        post.likes = (0..likes).map(|i| owner(&format!("Liker{i}"))).collect();
        post.comments = vec![PostComment {
            id: Uuid::new_v4(),
            body: "First!".to_string(),
            owner: owner("Commenter"),
            created_at: created,
            updated_at: created,
        }];
        self.posts.lock().unwrap().push(post.clone());
        post
    }

    pub fn stored(&self, post_id: Uuid) -> Option<Post> {
        let posts = self.posts.lock().unwrap();
        posts.iter().find(|p| p.id == post_id).cloned()
    }

    pub fn fail_on(&self, failure: PostFailure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    pub fn mutations(&self) -> usize {
        *self.mutations.lock().unwrap()
    }

    fn check(&self, call: PostFailure) -> Result<(), RepoError> {
        if *self.failure.lock().unwrap() == Some(call) {
            return Err(RepoError::Query("Testing error".to_string()));
        }
        Ok(())
    }

    fn mutate(&self, post_id: Uuid, f: impl FnOnce(&mut Post)) -> Option<Post> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts.iter_mut().find(|p| p.id == post_id)?;
        f(post);
        *self.mutations.lock().unwrap() += 1;
        Some(post.clone())
    }
}

#[async_trait]
impl PostDataSource for FakePostDataSource {
    async fn create_post(&self, owner: PostOwner, body: String) -> Result<Post, RepoError> {
        let post = Post::new(owner, body);
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn get_posts(&self) -> Result<Vec<Post>, RepoError> {
        self.check(PostFailure::GetPosts)?;
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn get_post_by_id(&self, post_id: Uuid) -> Result<Option<Post>, RepoError> {
        self.check(PostFailure::GetPostById)?;
        Ok(self.stored(post_id))
    }

    async fn like_post(
        &self,
        post_id: Uuid,
        like_owner: PostLikeOwner,
    ) -> Result<Option<Post>, RepoError> {
        self.check(PostFailure::LikePost)?;
        Ok(self.mutate(post_id, |post| {
            post.add_like(like_owner);
        }))
    }

    async fn comment_post(
        &self,
        post_id: Uuid,
        comment: PostComment,
    ) -> Result<Option<Post>, RepoError> {
        self.check(PostFailure::CommentPost)?;
        Ok(self.mutate(post_id, |post| post.add_comment(comment)))
    }
}

pub fn owner(name: &str) -> PostOwner {
    PostOwner {
        id: Uuid::new_v4(),
        name: name.to_string(),
        surname: "Tester".to_string(),
        avatar: format!("{}.png", name.to_lowercase()),
    }
}

/// Stores passwords as `hashed:<password>`.
pub struct FakePasswordService;

impl PasswordService for FakePasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash.strip_prefix("hashed:") == Some(password))
    }
}

/// Issues `<user_id>:<username>:<counter>` tokens.
#[derive(Default)]
pub struct FakeTokenService {
    issued: Mutex<u64>,
}

impl TokenService for FakeTokenService {
    fn generate_token(&self, user_id: Uuid, username: &str) -> Result<String, AuthError> {
        let mut issued = self.issued.lock().unwrap();
        *issued += 1;
        Ok(format!("{user_id}:{username}:{issued}"))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut parts = token.splitn(3, ':');
        let user_id = parts
            .next()
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or_else(|| AuthError::InvalidToken(token.to_string()))?;
        let username = parts
            .next()
            .ok_or_else(|| AuthError::InvalidToken(token.to_string()))?;
        Ok(TokenClaims {
            user_id,
            username: username.to_string(),
            exp: i64::MAX,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        3600
    }
}
