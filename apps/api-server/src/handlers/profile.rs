//! Profile handlers.

use actix_web::{HttpResponse, web};

use agora_core::domain::UserProfileUpdate;
use agora_shared::dto::UpdateProfileRequest;

use super::responses::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/profile - Protected route
pub async fn get_profile(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let profile = state.users.get_user_profile(identity.user.id).await?;

    Ok(HttpResponse::Ok().json(user_response(profile)))
}

/// PUT /api/profile - Protected route
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let update = UserProfileUpdate {
        name: req.name,
        surname: req.surname,
        avatar: req.avatar,
    };

    let profile = state
        .users
        .update_user_profile(identity.user.id, update)
        .await?;

    Ok(HttpResponse::Ok().json(user_response(profile)))
}
