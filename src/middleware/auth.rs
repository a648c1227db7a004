use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::models::user::{Claims, Role};
use crate::state::AppState;

/// Verifies the bearer token and stores its `Claims` in the request
/// extensions for handlers and role guards further in.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    // Expired and forged tokens both answer 401, with the reason in the body
    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("Rejected bearer token for {}: {}", request.uri().path(), e);
        AppError::Unauthorized(e.to_string())
    })?;

    // Insert claims into request extensions
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

async fn require_role(role: Role, request: Request, next: Next) -> Result<Response, AppError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    if claims.role != role {
        tracing::warn!(
            "{} ({}) denied access to {}",
            claims.sub,
            claims.role,
            request.uri().path()
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

pub async fn admin_only(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(Role::Admin, request, next).await
}

pub async fn instructor_only(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(Role::Instructor, request, next).await
}

pub async fn student_only(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(Role::Student, request, next).await
}
