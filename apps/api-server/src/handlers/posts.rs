//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use agora_shared::dto::{CreateCommentRequest, CreatePostRequest, PostResponse};

use super::responses::post_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<PostResponse> = state
        .posts
        .get_posts()
        .await?
        .into_iter()
        .map(post_response)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/posts - Protected route
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .create_post(identity.snapshot(), &body.body)
        .await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/posts/{id}/like - Protected route
pub async fn like_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .like_post(path.into_inner(), identity.snapshot())
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/posts/{id}/comments - Protected route
pub async fn comment_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .comment_post(path.into_inner(), identity.snapshot(), &body.body)
        .await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}
