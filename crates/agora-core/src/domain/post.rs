use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserProfile;

/// Snapshot of a user's public fields, embedded in posts at write time.
///
/// This is a denormalised copy: later profile edits do not reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOwner {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub avatar: String,
}

/// Entry of a post's like set.
pub type PostLikeOwner = PostOwner;

/// Author of a comment.
pub type PostCommentOwner = PostOwner;

impl From<&UserProfile> for PostOwner {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name.clone(),
            surname: profile.surname.clone(),
            avatar: profile.avatar.clone(),
        }
    }
}

/// Comment embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostComment {
    pub id: Uuid,
    pub body: String,
    pub owner: PostCommentOwner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostComment {
    pub fn new(owner: PostCommentOwner, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            body,
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Post entity - a user's message with its comments and likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub body: String,
    pub owner: PostOwner,
    pub comments: Vec<PostComment>,
    pub likes: Vec<PostLikeOwner>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post without comments or likes.
    pub fn new(owner: PostOwner, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            body,
            owner,
            comments: Vec::new(),
            likes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.likes.iter().any(|like| like.id == user_id)
    }

    /// Add a like unless `like_owner` already likes the post.
    ///
    /// Returns `false` when the like set was left untouched.
    pub fn add_like(&mut self, like_owner: PostLikeOwner) -> bool {
        if self.is_liked_by(like_owner.id) {
            return false;
        }
        self.likes.push(like_owner);
        self.updated_at = Utc::now();
        true
    }

    pub fn add_comment(&mut self, comment: PostComment) {
        self.comments.push(comment);
        self.updated_at = Utc::now();
    }
}
