use serde::Deserialize;
use validator::Validate;

use crate::models::approval::ApprovalStatus;
use crate::models::course::CourseStatus;
use crate::models::user::Role;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    #[validate(length(min = 1, message = "Course name is required"))]
    pub course_name: String,

    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CourseStatusQuery {
    pub status: CourseStatus,
}

#[derive(Debug, Deserialize)]
pub struct CourseListQuery {
    pub status: Option<CourseStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalCreateRequest {
    pub course_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ApprovalListQuery {
    pub status: Option<ApprovalStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GradeRequest {
    pub student_id: i64,
    pub course_id: i64,

    #[validate(range(min = 0, max = 100, message = "Score must be between 0 and 100"))]
    pub score: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SyllabusUpdateRequest {
    #[validate(length(min = 1, message = "Content cannot be blank"))]
    pub content: String,
}
