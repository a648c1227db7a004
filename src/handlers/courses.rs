use axum::{extract::State, response::Json};

use crate::dtos::course_dtos::CourseListQuery;
use crate::errors::Result;
use crate::extract::{AppPath, AppQuery};
use crate::models::course::{CourseResponse, CourseStatus};
use crate::state::AppState;

/// Lists approved courses unless another status is asked for.
pub async fn list_courses(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CourseListQuery>,
) -> Result<Json<Vec<CourseResponse>>> {
    let status = query.status.unwrap_or(CourseStatus::Approved);
    Ok(Json(state.courses.list_by_status(status).await?))
}

pub async fn get_course(
    State(state): State<AppState>,
    AppPath(course_id): AppPath<i64>,
) -> Result<Json<CourseResponse>> {
    Ok(Json(state.courses.get(course_id).await?))
}
