use axum::{routing::post, Router};

use crate::handlers::{auth, auth_otp};
use crate::state::AppState;

/// Public endpoints: nothing here requires a bearer token.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Request OTP for password reset
        .route("/forgot-password", post(auth_otp::forgot_password))
        // Reset password with OTP
        .route("/reset-password", post(auth_otp::reset_password))
        // Reset password with a single-use token
        .route("/password-reset/request", post(auth_otp::request_reset_token))
        .route("/password-reset/confirm", post(auth_otp::confirm_reset_token))
}
