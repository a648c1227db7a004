use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub enrollment_id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub enrolled_at: DateTime<Utc>,
}
