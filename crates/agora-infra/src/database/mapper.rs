//! Conversions between persisted documents and domain models.

use sea_orm::Set;

use agora_core::domain::{Post, PostComment, PostOwner, User, UserProfile};
use agora_core::error::RepoError;

use super::entity::post::{self, CommentDocument, CommentDocuments, LikeDocuments, OwnerDocument};
use super::entity::user;

/// Conversion from SeaORM Model to Domain User.
impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password: model.password,
            email: model.email,
            token: model.token,
            name: model.name,
            surname: model.surname,
            avatar: model.avatar,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<user::Model> for UserProfile {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            name: model.name,
            surname: model.surname,
            avatar: model.avatar,
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<User> for user::ActiveModel {
    fn from(user: User) -> Self {
        Self {
            id: Set(user.id),
            username: Set(user.username),
            password: Set(user.password),
            email: Set(user.email),
            token: Set(user.token),
            name: Set(user.name),
            surname: Set(user.surname),
            avatar: Set(user.avatar),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}

impl From<OwnerDocument> for PostOwner {
    fn from(doc: OwnerDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            surname: doc.surname,
            avatar: doc.avatar,
        }
    }
}

impl From<PostOwner> for OwnerDocument {
    fn from(owner: PostOwner) -> Self {
        Self {
            id: owner.id,
            name: owner.name,
            surname: owner.surname,
            avatar: owner.avatar,
        }
    }
}

impl From<CommentDocument> for PostComment {
    fn from(doc: CommentDocument) -> Self {
        Self {
            id: doc.id,
            body: doc.body,
            owner: doc.owner.into(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

impl From<PostComment> for CommentDocument {
    fn from(comment: PostComment) -> Self {
        Self {
            id: comment.id,
            body: comment.body,
            owner: comment.owner.into(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<post::Model> for Post {
    fn from(model: post::Model) -> Self {
        Self {
            id: model.id,
            body: model.body,
            owner: model.owner.into(),
            comments: model.comments.0.into_iter().map(Into::into).collect(),
            likes: model.likes.0.into_iter().map(Into::into).collect(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for post::ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            body: Set(post.body),
            owner: Set(post.owner.into()),
            comments: Set(CommentDocuments(
                post.comments.into_iter().map(Into::into).collect(),
            )),
            likes: Set(LikeDocuments(post.likes.into_iter().map(Into::into).collect())),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}

/// Single-element `jsonb` array to append to an embedded document list.
pub(crate) fn append_payload<T: serde::Serialize>(doc: T) -> Result<serde_json::Value, RepoError> {
    serde_json::to_value([doc]).map_err(|e| RepoError::Query(e.to_string()))
}

/// Containment probe matching a like entry by owner id.
pub(crate) fn like_probe(owner: &PostOwner) -> serde_json::Value {
    serde_json::json!([{ "_id": owner.id }])
}
