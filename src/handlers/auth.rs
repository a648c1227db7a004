use axum::{extract::State, http::StatusCode, response::Json, Extension};
use validator::Validate;

use crate::dtos::auth_dtos::{LoginRequest, LoginResponse, RegisterRequest};
use crate::errors::Result;
use crate::extract::AppJson;
use crate::models::user::{Claims, UserResponse};
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    payload.validate()?;

    tracing::debug!("Attempting to register new user with username: {}", payload.username);
    let user = state.users.register(&payload).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    payload.validate()?;

    let user = state
        .users
        .authenticate(&payload.username, &payload.password)
        .await?;

    let token = state
        .tokens
        .issue(&user.username, user.role, &user.email, user.user_id)?;

    tracing::info!("Login successful for user: {} with role: {}", user.username, user.role);

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.ttl().num_seconds(),
        username: user.username,
        role: user.role,
        email: user.email,
        user_id: user.user_id,
    }))
}

pub async fn me(Extension(claims): Extension<Claims>) -> Json<Claims> {
    Json(claims)
}
