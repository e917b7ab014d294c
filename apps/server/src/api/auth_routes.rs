use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UserProfile};
use tripfolio_core::users::NewUser;

#[utoipa::path(post, path = "/api/v1/auth/register", request_body = RegisterRequest,
    responses((status = 201, body = UserProfile)))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let user = state
        .user_service
        .register(NewUser {
            email: payload.email,
            display_name: payload.display_name,
            password: payload.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(UserProfile::from(user))))
}

#[utoipa::path(post, path = "/api/v1/auth/login", request_body = LoginRequest,
    responses((status = 200, body = LoginResponse), (status = 401, description = "Bad credentials")))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state
        .user_service
        .verify_credentials(&payload.email, &payload.password)?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let (access_token, expires_in) = state.auth.issue_token(&user.id)?;
    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in,
        user: UserProfile::from(user),
    }))
}

#[utoipa::path(get, path = "/api/v1/auth/me", responses((status = 200, body = UserProfile)))]
pub async fn me(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UserProfile>> {
    let user = state.user_service.get_user(&user.id)?;
    Ok(Json(UserProfile::from(user)))
}

pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}
