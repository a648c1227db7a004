use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CourseStatus::Pending => "PENDING",
            CourseStatus::Approved => "APPROVED",
            CourseStatus::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Course {
    pub course_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: CourseStatus,
    pub instructor_id: i64,
}

/// Course joined with its instructor's username.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub course_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: CourseStatus,
    pub instructor_id: i64,
    pub instructor_name: String,
}
