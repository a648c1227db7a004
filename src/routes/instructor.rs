use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::handlers::instructor;
use crate::middleware::auth::instructor_only;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(instructor::my_courses).post(instructor::create_course))
        .route("/grade", post(instructor::assign_grade))
        .route("/grades/:course_id", get(instructor::course_grades))
        .route("/syllabus/:course_id", put(instructor::update_syllabus))
        .route_layer(middleware::from_fn(instructor_only))
}
