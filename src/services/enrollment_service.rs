use chrono::Utc;
use sqlx::SqlitePool;

use crate::errors::{AppError, Result};
use crate::models::enrollment::EnrollmentResponse;
use crate::services::course_service::ensure_course_exists;

const ENROLLMENT_SELECT: &str = "SELECT e.enrollment_id, e.course_id, c.name AS course_name, \
     e.enrolled_at FROM enrollments e JOIN courses c ON c.course_id = e.course_id";

#[derive(Clone)]
pub struct EnrollmentService {
    db: SqlitePool,
}

impl EnrollmentService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn enroll(&self, student_id: i64, course_id: i64) -> Result<EnrollmentResponse> {
        ensure_course_exists(&self.db, course_id).await?;

        let (enrollment_id,): (i64,) = sqlx::query_as(
            "INSERT INTO enrollments (enrolled_at, student_id, course_id) VALUES (?, ?, ?) \
             RETURNING enrollment_id",
        )
        .bind(Utc::now())
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_insert(e, "Enrollment"))?;

        tracing::info!("Student {} enrolled in course {}", student_id, course_id);

        sqlx::query_as::<_, EnrollmentResponse>(&format!(
            "{ENROLLMENT_SELECT} WHERE e.enrollment_id = ?"
        ))
        .bind(enrollment_id)
        .fetch_one(&self.db)
        .await
        .map_err(AppError::from)
    }

    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<EnrollmentResponse>> {
        let enrollments = sqlx::query_as::<_, EnrollmentResponse>(&format!(
            "{ENROLLMENT_SELECT} WHERE e.student_id = ? ORDER BY e.enrollment_id"
        ))
        .bind(student_id)
        .fetch_all(&self.db)
        .await?;
        Ok(enrollments)
    }
}
