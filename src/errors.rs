// src/errors.rs
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::token_service::TokenError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Expired(String),

    #[error("Invalid credentials")]
    InvalidCredential,

    #[error("{0}")]
    Unauthorized(String),

    #[error("Access denied for this role")]
    Forbidden,

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(_) | AppError::Migration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::Expired(_) => (StatusCode::GONE, "Expired"),
            AppError::InvalidCredential => (StatusCode::UNAUTHORIZED, "Authentication failed"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            AppError::AlreadyExists(_) => (StatusCode::CONFLICT, "Duplicate entry"),
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "Validation failed"),
            AppError::ConfigurationError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        // Storage details stay in the log
        let message = match &self {
            AppError::Database(_) | AppError::Migration(_) | AppError::Internal(_) => {
                error_message.to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(json!({
            "error": error_message,
            "message": message,
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("Password hashing failed: {}", err))
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::Expired("Token has expired".to_string()),
            TokenError::InvalidSignature | TokenError::Malformed(_) => AppError::InvalidCredential,
            TokenError::Encoding(msg) => AppError::Internal(msg),
        }
    }
}

// Helper conversion functions
impl AppError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        AppError::AlreadyExists(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::ConfigurationError(msg.into())
    }

    /// Maps a unique-constraint violation to `AlreadyExists` and a dangling
    /// foreign key to `NotFound`; anything else stays a database error.
    pub fn from_insert(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::AlreadyExists(format!("{} already exists", what))
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::NotFound(format!(
                    "{} refers to a user or course that no longer exists",
                    what
                ))
            }
            _ => AppError::Database(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::not_found("Course not found"), StatusCode::NOT_FOUND),
            (AppError::Expired("OTP expired".into()), StatusCode::GONE),
            (AppError::InvalidCredential, StatusCode::UNAUTHORIZED),
            (AppError::Unauthorized("Token has expired".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden, StatusCode::FORBIDDEN),
            (AppError::already_exists("Email already exists"), StatusCode::CONFLICT),
            (AppError::invalid_data("bad score"), StatusCode::BAD_REQUEST),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_token_errors_are_not_swallowed() {
        assert!(matches!(
            AppError::from(TokenError::InvalidSignature),
            AppError::InvalidCredential
        ));
        assert!(matches!(AppError::from(TokenError::Expired), AppError::Expired(_)));
    }
}
