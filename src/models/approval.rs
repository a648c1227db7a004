use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::course::CourseStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl From<CourseStatus> for ApprovalStatus {
    /// A decision is either an approval or a rejection; anything that isn't
    /// `APPROVED` is recorded as `REJECTED`.
    fn from(status: CourseStatus) -> Self {
        match status {
            CourseStatus::Approved => ApprovalStatus::Approved,
            _ => ApprovalStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    pub request_id: i64,
    pub status: ApprovalStatus,
    pub request_date: DateTime<Utc>,
    pub decision_date: Option<DateTime<Utc>>,
    pub admin_id: i64,
    pub course_id: i64,
}
