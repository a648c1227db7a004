pub mod admin;
pub mod auth;
pub mod courses;
pub mod instructor;
pub mod student;

use axum::{http::Method, middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::health;
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false);

    // Everything in here needs a valid bearer token
    let protected = Router::new()
        .merge(courses::routes())
        .nest("/admin", admin::routes())
        .nest("/instructor", instructor::routes())
        .nest("/student", student::routes())
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/health", get(health::api_health_check))
        .nest("/api/auth", auth::routes())
        .nest("/api", protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
