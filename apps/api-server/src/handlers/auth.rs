//! Authentication handlers.

use actix_web::{HttpResponse, web};

use agora_shared::dto::{AuthResponse, LoginRequest, SignupRequest};

use super::responses::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let profile = state
        .auth
        .signup(&req.username, &req.email, &req.password)
        .await?;

    Ok(HttpResponse::Created().json(user_response(profile)))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state.auth.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(session.expires_in).unwrap_or_default(),
        user: user_response(session.user),
    }))
}

/// POST /api/auth/logout - Protected route
pub async fn logout(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.auth.logout(identity.user.id).await?;

    Ok(HttpResponse::Ok().json(user_response(user.profile())))
}
