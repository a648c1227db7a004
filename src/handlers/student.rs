use axum::{
    extract::State,
    response::Json,
    Extension,
};

use crate::errors::Result;
use crate::extract::AppPath;
use crate::models::enrollment::EnrollmentResponse;
use crate::models::grade::GradeView;
use crate::models::syllabus::SyllabusView;
use crate::models::user::Claims;
use crate::state::AppState;

pub async fn enroll(
    State(state): State<AppState>,
    Extension(student): Extension<Claims>,
    AppPath(course_id): AppPath<i64>,
) -> Result<Json<EnrollmentResponse>> {
    // Tokens outlive deleted accounts
    state.users.find_by_id(student.user_id).await?;
    Ok(Json(state.enrollments.enroll(student.user_id, course_id).await?))
}

pub async fn my_enrollments(
    State(state): State<AppState>,
    Extension(student): Extension<Claims>,
) -> Result<Json<Vec<EnrollmentResponse>>> {
    Ok(Json(state.enrollments.list_by_student(student.user_id).await?))
}

pub async fn view_grade(
    State(state): State<AppState>,
    Extension(student): Extension<Claims>,
    AppPath(course_id): AppPath<i64>,
) -> Result<Json<GradeView>> {
    Ok(Json(state.grades.get_for_student(student.user_id, course_id).await?))
}

pub async fn view_syllabus(
    State(state): State<AppState>,
    AppPath(course_id): AppPath<i64>,
) -> Result<Json<SyllabusView>> {
    let syllabus = state.syllabi.get_by_course(course_id).await?;
    Ok(Json(SyllabusView::from(syllabus)))
}
