use chrono::Utc;
use sqlx::SqlitePool;

use crate::errors::{AppError, Result};
use crate::models::syllabus::SyllabusResponse;
use crate::services::course_service::ensure_course_exists;

const SYLLABUS_SELECT: &str = "SELECT s.syllabus_id, s.content, s.last_updated, s.course_id, \
     c.name AS course_name FROM syllabi s JOIN courses c ON c.course_id = s.course_id";

#[derive(Clone)]
pub struct SyllabusService {
    db: SqlitePool,
}

impl SyllabusService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Creates the course's syllabus or replaces its content.
    pub async fn update(&self, course_id: i64, content: &str) -> Result<SyllabusResponse> {
        if content.trim().is_empty() {
            return Err(AppError::invalid_data("Syllabus content cannot be empty"));
        }
        ensure_course_exists(&self.db, course_id).await?;

        sqlx::query(
            "INSERT INTO syllabi (content, last_updated, course_id) VALUES (?, ?, ?) \
             ON CONFLICT (course_id) DO UPDATE SET \
             content = excluded.content, last_updated = excluded.last_updated",
        )
        .bind(content)
        .bind(Utc::now())
        .bind(course_id)
        .execute(&self.db)
        .await?;

        tracing::debug!("Updated syllabus for course {}", course_id);
        self.get_by_course(course_id).await
    }

    pub async fn get_by_course(&self, course_id: i64) -> Result<SyllabusResponse> {
        ensure_course_exists(&self.db, course_id).await?;

        sqlx::query_as::<_, SyllabusResponse>(&format!("{SYLLABUS_SELECT} WHERE s.course_id = ?"))
            .bind(course_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Syllabus not found"))
    }
}
