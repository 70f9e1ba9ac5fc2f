//! Domain model to response DTO conversions.

use agora_core::domain::{Post, PostComment, PostOwner, UserProfile};
use agora_shared::dto::{CommentResponse, OwnerResponse, PostResponse, UserResponse};

pub fn user_response(profile: UserProfile) -> UserResponse {
    UserResponse {
        id: profile.id,
        username: profile.username,
        email: profile.email,
        name: profile.name,
        surname: profile.surname,
        avatar: profile.avatar,
    }
}

fn owner_response(owner: PostOwner) -> OwnerResponse {
    OwnerResponse {
        id: owner.id,
        name: owner.name,
        surname: owner.surname,
        avatar: owner.avatar,
    }
}

fn comment_response(comment: PostComment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        body: comment.body,
        owner: owner_response(comment.owner),
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

pub fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        body: post.body,
        owner: owner_response(post.owner),
        comments: post.comments.into_iter().map(comment_response).collect(),
        likes: post.likes.into_iter().map(owner_response).collect(),
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}
