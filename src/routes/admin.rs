use axum::{
    middleware,
    routing::{delete, get, put},
    Router,
};

use crate::handlers::admin;
use crate::middleware::auth::admin_only;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // PUT /api/admin/courses/:id/status?status=APPROVED
        .route("/courses/:id/status", put(admin::update_course_status))
        .route(
            "/approval-requests",
            get(admin::list_approval_requests).post(admin::create_approval_request),
        )
        .route("/users", get(admin::list_users))
        .route("/users/:id", delete(admin::delete_user))
        .route_layer(middleware::from_fn(admin_only))
}
