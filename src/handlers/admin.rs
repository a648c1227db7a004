use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    Extension,
};

use crate::dtos::auth_dtos::MessageResponse;
use crate::dtos::course_dtos::{
    ApprovalCreateRequest, ApprovalListQuery, CourseStatusQuery, UserListQuery,
};
use crate::errors::Result;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::approval::ApprovalRequest;
use crate::models::course::CourseResponse;
use crate::models::user::{Claims, UserResponse};
use crate::state::AppState;

pub async fn update_course_status(
    State(state): State<AppState>,
    Extension(admin): Extension<Claims>,
    AppPath(course_id): AppPath<i64>,
    AppQuery(query): AppQuery<CourseStatusQuery>,
) -> Result<Json<CourseResponse>> {
    let course = state
        .courses
        .update_status(course_id, query.status, admin.user_id)
        .await?;
    Ok(Json(course))
}

pub async fn create_approval_request(
    State(state): State<AppState>,
    Extension(admin): Extension<Claims>,
    AppJson(payload): AppJson<ApprovalCreateRequest>,
) -> Result<(StatusCode, Json<ApprovalRequest>)> {
    let request = state
        .approvals
        .create(payload.course_id, admin.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn list_approval_requests(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ApprovalListQuery>,
) -> Result<Json<Vec<ApprovalRequest>>> {
    Ok(Json(state.approvals.list_by_status(query.status).await?))
}

pub async fn list_users(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<UserListQuery>,
) -> Result<Json<Vec<UserResponse>>> {
    let users = state.users.list_by_role(query.role).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> Result<Json<MessageResponse>> {
    state.users.delete(user_id).await?;
    Ok(Json(MessageResponse::ok("User deleted successfully")))
}
