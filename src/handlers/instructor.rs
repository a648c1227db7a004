use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    Extension,
};
use validator::Validate;

use crate::dtos::course_dtos::{CourseRequest, GradeRequest, SyllabusUpdateRequest};
use crate::errors::Result;
use crate::extract::{AppJson, AppPath};
use crate::models::course::CourseResponse;
use crate::models::grade::GradeView;
use crate::models::syllabus::SyllabusResponse;
use crate::models::user::Claims;
use crate::state::AppState;

pub async fn create_course(
    State(state): State<AppState>,
    Extension(instructor): Extension<Claims>,
    AppJson(payload): AppJson<CourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>)> {
    payload.validate()?;
    let course = state.courses.create(&payload, instructor.user_id).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn my_courses(
    State(state): State<AppState>,
    Extension(instructor): Extension<Claims>,
) -> Result<Json<Vec<CourseResponse>>> {
    Ok(Json(state.courses.list_by_instructor(instructor.user_id).await?))
}

pub async fn assign_grade(
    State(state): State<AppState>,
    Extension(instructor): Extension<Claims>,
    AppJson(payload): AppJson<GradeRequest>,
) -> Result<Json<GradeView>> {
    payload.validate()?;
    state
        .courses
        .ensure_taught_by(payload.course_id, instructor.user_id)
        .await?;
    Ok(Json(state.grades.assign(&payload).await?))
}

pub async fn course_grades(
    State(state): State<AppState>,
    Extension(instructor): Extension<Claims>,
    AppPath(course_id): AppPath<i64>,
) -> Result<Json<Vec<GradeView>>> {
    state
        .courses
        .ensure_taught_by(course_id, instructor.user_id)
        .await?;
    Ok(Json(state.grades.list_by_course(course_id).await?))
}

pub async fn update_syllabus(
    State(state): State<AppState>,
    Extension(instructor): Extension<Claims>,
    AppPath(course_id): AppPath<i64>,
    AppJson(payload): AppJson<SyllabusUpdateRequest>,
) -> Result<Json<SyllabusResponse>> {
    payload.validate()?;
    state
        .courses
        .ensure_taught_by(course_id, instructor.user_id)
        .await?;
    Ok(Json(state.syllabi.update(course_id, &payload.content).await?))
}
