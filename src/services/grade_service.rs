use sqlx::SqlitePool;

use crate::dtos::course_dtos::GradeRequest;
use crate::errors::{AppError, Result};
use crate::models::grade::{GradeView, MAX_SCORE, MIN_SCORE};
use crate::services::course_service::ensure_course_exists;

const GRADE_SELECT: &str = "SELECT g.grade_id, g.score, g.student_id, u.username AS student_name, \
     g.course_id, c.name AS course_name \
     FROM grades g \
     JOIN users u ON u.user_id = g.student_id \
     JOIN courses c ON c.course_id = g.course_id";

pub fn validate_score(score: i32) -> Result<()> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(AppError::invalid_data("Score must be between 0 and 100"));
    }
    Ok(())
}

#[derive(Clone)]
pub struct GradeService {
    db: SqlitePool,
}

impl GradeService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// One grade per (student, course); assigning again overwrites the score.
    pub async fn assign(&self, req: &GradeRequest) -> Result<GradeView> {
        validate_score(req.score)?;

        let student: Option<(i64,)> =
            sqlx::query_as("SELECT user_id FROM users WHERE user_id = ? AND role = 'STUDENT'")
                .bind(req.student_id)
                .fetch_optional(&self.db)
                .await?;
        if student.is_none() {
            return Err(AppError::not_found("Student not found"));
        }
        ensure_course_exists(&self.db, req.course_id).await?;

        let (grade_id,): (i64,) = sqlx::query_as(
            "INSERT INTO grades (score, student_id, course_id) VALUES (?, ?, ?) \
             ON CONFLICT (student_id, course_id) DO UPDATE SET score = excluded.score \
             RETURNING grade_id",
        )
        .bind(req.score)
        .bind(req.student_id)
        .bind(req.course_id)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            "Assigned score {} to student {} in course {}",
            req.score,
            req.student_id,
            req.course_id
        );

        sqlx::query_as::<_, GradeView>(&format!("{GRADE_SELECT} WHERE g.grade_id = ?"))
            .bind(grade_id)
            .fetch_one(&self.db)
            .await
            .map_err(AppError::from)
    }

    pub async fn get_for_student(&self, student_id: i64, course_id: i64) -> Result<GradeView> {
        ensure_course_exists(&self.db, course_id).await?;

        sqlx::query_as::<_, GradeView>(&format!(
            "{GRADE_SELECT} WHERE g.student_id = ? AND g.course_id = ?"
        ))
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Grade not found"))
    }

    pub async fn list_by_course(&self, course_id: i64) -> Result<Vec<GradeView>> {
        ensure_course_exists(&self.db, course_id).await?;

        let grades = sqlx::query_as::<_, GradeView>(&format!(
            "{GRADE_SELECT} WHERE g.course_id = ? ORDER BY g.grade_id"
        ))
        .bind(course_id)
        .fetch_all(&self.db)
        .await?;
        Ok(grades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_score_bounds() {
        assert!(validate_score(0).is_ok());
        assert!(validate_score(100).is_ok());
        assert!(matches!(validate_score(-1), Err(AppError::ValidationError(_))));
        assert!(matches!(validate_score(101), Err(AppError::ValidationError(_))));
    }
}
