use axum::{routing::get, Router};

use crate::handlers::{auth, courses};
use crate::state::AppState;

/// Endpoints open to any authenticated role.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(courses::list_courses))
        .route("/courses/:id", get(courses::get_course))
        .route("/me", get(auth::me))
}
