use chrono::{DateTime, Utc};

/// Persisted password reset token. Only the SHA-256 of the raw token is
/// stored; the raw value goes to the user out of band.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PasswordResetToken {
    pub id: i64,
    pub token_hash: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
