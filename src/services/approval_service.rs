use chrono::Utc;
use sqlx::SqlitePool;

use crate::errors::{AppError, Result};
use crate::models::approval::{ApprovalRequest, ApprovalStatus};
use crate::services::course_service::ensure_course_exists;

const APPROVAL_COLUMNS: &str =
    "request_id, status, request_date, decision_date, admin_id, course_id";

#[derive(Clone)]
pub struct ApprovalRequestService {
    db: SqlitePool,
}

impl ApprovalRequestService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Opens a `PENDING` request for the course, assigned to `admin_id`.
    pub async fn create(&self, course_id: i64, admin_id: i64) -> Result<ApprovalRequest> {
        ensure_course_exists(&self.db, course_id).await?;

        let request = sqlx::query_as::<_, ApprovalRequest>(&format!(
            "INSERT INTO approval_requests (status, request_date, admin_id, course_id) \
             VALUES (?, ?, ?, ?) RETURNING {APPROVAL_COLUMNS}"
        ))
        .bind(ApprovalStatus::Pending)
        .bind(Utc::now())
        .bind(admin_id)
        .bind(course_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_insert(e, "Approval request"))?;

        Ok(request)
    }

    pub async fn list_by_status(
        &self,
        status: Option<ApprovalStatus>,
    ) -> Result<Vec<ApprovalRequest>> {
        let requests = match status {
            Some(status) => {
                sqlx::query_as::<_, ApprovalRequest>(&format!(
                    "SELECT {APPROVAL_COLUMNS} FROM approval_requests WHERE status = ? \
                     ORDER BY request_id"
                ))
                .bind(status)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, ApprovalRequest>(&format!(
                    "SELECT {APPROVAL_COLUMNS} FROM approval_requests ORDER BY request_id"
                ))
                .fetch_all(&self.db)
                .await?
            }
        };
        Ok(requests)
    }

    pub async fn list_by_course(&self, course_id: i64) -> Result<Vec<ApprovalRequest>> {
        let requests = sqlx::query_as::<_, ApprovalRequest>(&format!(
            "SELECT {APPROVAL_COLUMNS} FROM approval_requests WHERE course_id = ? \
             ORDER BY request_id"
        ))
        .bind(course_id)
        .fetch_all(&self.db)
        .await?;
        Ok(requests)
    }
}
