use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::student;
use crate::middleware::auth::student_only;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/enroll/:course_id", post(student::enroll))
        .route("/enrollments", get(student::my_enrollments))
        .route("/grades/:course_id", get(student::view_grade))
        .route("/syllabus/:course_id", get(student::view_syllabus))
        .route_layer(middleware::from_fn(student_only))
}
