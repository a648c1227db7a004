use serde::{Deserialize, Serialize};

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

/// Grade joined with student and course names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GradeView {
    pub grade_id: i64,
    pub score: i32,
    pub student_id: i64,
    pub student_name: String,
    pub course_id: i64,
    pub course_name: String,
}
