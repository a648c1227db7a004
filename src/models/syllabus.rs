use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusResponse {
    pub syllabus_id: i64,
    pub content: String,
    pub last_updated: DateTime<Utc>,
    pub course_id: i64,
    pub course_name: String,
}

/// What students see: content and freshness only.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusView {
    pub content: String,
    pub last_updated: DateTime<Utc>,
}

impl From<SyllabusResponse> for SyllabusView {
    fn from(s: SyllabusResponse) -> Self {
        SyllabusView {
            content: s.content,
            last_updated: s.last_updated,
        }
    }
}
