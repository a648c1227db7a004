use chrono::Utc;
use sqlx::SqlitePool;

use crate::dtos::course_dtos::CourseRequest;
use crate::errors::{AppError, Result};
use crate::models::approval::ApprovalStatus;
use crate::models::course::{Course, CourseResponse, CourseStatus};

const COURSE_SELECT: &str = "SELECT c.course_id, c.name, c.description, c.status, \
     c.instructor_id, u.username AS instructor_name \
     FROM courses c JOIN users u ON u.user_id = c.instructor_id";

/// Fails with `NotFound` unless the course row exists.
pub(crate) async fn ensure_course_exists(db: &SqlitePool, course_id: i64) -> Result<()> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT course_id FROM courses WHERE course_id = ?")
        .bind(course_id)
        .fetch_optional(db)
        .await?;
    row.map(|_| ()).ok_or_else(|| AppError::not_found("Course not found"))
}

#[derive(Clone)]
pub struct CourseService {
    db: SqlitePool,
}

impl CourseService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// New courses start out `PENDING` until an admin decides on them.
    pub async fn create(&self, req: &CourseRequest, instructor_id: i64) -> Result<CourseResponse> {
        let name = req.course_name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_data("Course name is required"));
        }

        let instructor: Option<(i64,)> =
            sqlx::query_as("SELECT user_id FROM users WHERE user_id = ? AND role = 'INSTRUCTOR'")
                .bind(instructor_id)
                .fetch_optional(&self.db)
                .await?;
        if instructor.is_none() {
            return Err(AppError::not_found("Instructor not found"));
        }

        let course = sqlx::query_as::<_, Course>(
            "INSERT INTO courses (name, description, status, instructor_id) VALUES (?, ?, ?, ?) \
             RETURNING course_id, name, description, status, instructor_id",
        )
        .bind(name)
        .bind(&req.description)
        .bind(CourseStatus::Pending)
        .bind(instructor_id)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            "Instructor {} created course {} ({})",
            course.instructor_id,
            course.course_id,
            course.name
        );
        self.get(course.course_id).await
    }

    /// Sets the course status and records the decision as an approval
    /// request, both in one transaction.
    pub async fn update_status(
        &self,
        course_id: i64,
        status: CourseStatus,
        admin_id: i64,
    ) -> Result<CourseResponse> {
        let now = Utc::now();
        let mut tx = self.db.begin().await?;

        let result = sqlx::query("UPDATE courses SET status = ? WHERE course_id = ?")
            .bind(status)
            .bind(course_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Course not found"));
        }

        sqlx::query(
            "INSERT INTO approval_requests (status, request_date, decision_date, admin_id, course_id) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(ApprovalStatus::from(status))
        .bind(now)
        .bind(now)
        .bind(admin_id)
        .bind(course_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_insert(e, "Approval request"))?;

        tx.commit().await?;

        tracing::info!("Admin {} set course {} to {}", admin_id, course_id, status);
        self.get(course_id).await
    }

    pub async fn get(&self, course_id: i64) -> Result<CourseResponse> {
        sqlx::query_as::<_, CourseResponse>(&format!("{COURSE_SELECT} WHERE c.course_id = ?"))
            .bind(course_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))
    }

    pub async fn list_by_status(&self, status: CourseStatus) -> Result<Vec<CourseResponse>> {
        let courses = sqlx::query_as::<_, CourseResponse>(&format!(
            "{COURSE_SELECT} WHERE c.status = ? ORDER BY c.course_id"
        ))
        .bind(status)
        .fetch_all(&self.db)
        .await?;
        Ok(courses)
    }

    pub async fn list_by_instructor(&self, instructor_id: i64) -> Result<Vec<CourseResponse>> {
        let courses = sqlx::query_as::<_, CourseResponse>(&format!(
            "{COURSE_SELECT} WHERE c.instructor_id = ? ORDER BY c.course_id"
        ))
        .bind(instructor_id)
        .fetch_all(&self.db)
        .await?;
        Ok(courses)
    }

    /// `NotFound` if the course is missing, `Forbidden` if someone else
    /// teaches it.
    pub async fn ensure_taught_by(&self, course_id: i64, instructor_id: i64) -> Result<()> {
        let course = self.get(course_id).await?;
        if course.instructor_id != instructor_id {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}
