use axum::{extract::State, http::StatusCode, response::Json};
use validator::Validate;

use crate::dtos::auth_dtos::{
    ForgotPasswordRequest, MessageResponse, OtpResetPasswordRequest, ResetTokenConfirmRequest,
};
use crate::errors::{AppError, Result};
use crate::extract::AppJson;
use crate::state::AppState;

// 1. Forgot Password - Request OTP
pub async fn forgot_password(
    State(state): State<AppState>,
    AppJson(req): AppJson<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    req.validate()?;
    tracing::info!("Password reset requested for email: {}", req.email);

    if state.users.find_by_email(&req.email).await?.is_none() {
        return Err(AppError::not_found("No user found with this email address"));
    }

    let otp = state.otp_store.generate(&req.email);
    state.notifier.send_otp(&req.email, &otp).await?;

    Ok(Json(MessageResponse::ok("OTP has been sent to your email")))
}

// 2. Reset password with OTP verification
pub async fn reset_password(
    State(state): State<AppState>,
    AppJson(req): AppJson<OtpResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    req.validate()?;

    if !state.otp_store.validate(&req.email, &req.otp) {
        return Err(AppError::invalid_data("Invalid or expired OTP"));
    }

    state.users.update_password(&req.email, &req.new_password).await?;

    tracing::info!("Password successfully reset for user: {}", req.email);
    Ok(Json(MessageResponse::ok("Password has been reset successfully")))
}

// 3. Request a reset token. Always accepted so the endpoint can't be used
//    to probe for registered emails.
pub async fn request_reset_token(
    State(state): State<AppState>,
    AppJson(req): AppJson<ForgotPasswordRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    req.validate()?;

    match state.users.find_by_email(&req.email).await? {
        Some(user) => {
            let token = state.reset_tokens.generate(&user).await?;
            state.notifier.send_reset_token(&user.email, &token).await?;
        }
        None => tracing::debug!("Reset token requested for unknown email: {}", req.email),
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::ok(
            "If the address is registered, a reset token has been sent",
        )),
    ))
}

// 4. Redeem a reset token
pub async fn confirm_reset_token(
    State(state): State<AppState>,
    AppJson(req): AppJson<ResetTokenConfirmRequest>,
) -> Result<Json<MessageResponse>> {
    req.validate()?;

    state.reset_tokens.redeem(&req.token, &req.new_password).await?;

    Ok(Json(MessageResponse::ok("Password has been reset successfully")))
}
