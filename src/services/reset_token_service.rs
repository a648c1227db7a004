use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::reset_token::PasswordResetToken;
use crate::models::user::User;
use crate::services::password::hash_password;

pub fn reset_token_validity() -> Duration {
    Duration::hours(1)
}

/// Hash a reset token using SHA256
pub fn hash_reset_token(raw_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Single-use password reset tokens persisted in `password_reset_tokens`.
///
/// Issuing a token does not invalidate older ones for the same user. Every
/// redemption attempt that finds the row deletes it, whether the token turns
/// out to be live or expired.
#[derive(Clone)]
pub struct ResetTokenService {
    db: SqlitePool,
    bcrypt_cost: u32,
    validity: Duration,
}

impl ResetTokenService {
    pub fn new(db: SqlitePool, bcrypt_cost: u32) -> Self {
        Self {
            db,
            bcrypt_cost,
            validity: reset_token_validity(),
        }
    }

    pub async fn generate(&self, user: &User) -> Result<String> {
        self.generate_at(user, Utc::now()).await
    }

    pub async fn generate_at(&self, user: &User, now: DateTime<Utc>) -> Result<String> {
        let raw = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO password_reset_tokens (token_hash, user_id, expires_at, created_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(hash_reset_token(&raw))
        .bind(user.user_id)
        .bind(now + self.validity)
        .bind(now)
        .execute(&self.db)
        .await?;

        tracing::debug!("Created password reset token for user {}", user.user_id);
        Ok(raw)
    }

    /// Returns the id of the user whose password was changed.
    pub async fn redeem(&self, token: &str, new_password: &str) -> Result<i64> {
        self.redeem_at(token, new_password, Utc::now()).await
    }

    pub async fn redeem_at(
        &self,
        token: &str,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let password_hash = hash_password(new_password, self.bcrypt_cost)?;

        let mut tx = self.db.begin().await?;

        let reset_token = sqlx::query_as::<_, PasswordResetToken>(
            "DELETE FROM password_reset_tokens WHERE token_hash = ? \
             RETURNING id, token_hash, user_id, expires_at, created_at",
        )
        .bind(hash_reset_token(token))
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Invalid token"))?;

        if now > reset_token.expires_at {
            tx.commit().await?;
            tracing::info!("Rejected expired reset token for user {}", reset_token.user_id);
            return Err(AppError::Expired("Token expired".to_string()));
        }

        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE user_id = ?")
            .bind(&password_hash)
            .bind(reset_token.user_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        tx.commit().await?;

        tracing::info!("Password reset via token for user {}", reset_token.user_id);
        Ok(reset_token.user_id)
    }

    pub async fn purge_expired(&self) -> Result<u64> {
        self.purge_expired_at(Utc::now()).await
    }

    pub async fn purge_expired_at(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM password_reset_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count_for_user(&self, user_id: i64) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM password_reset_tokens WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&self.db)
                .await?;
        Ok(count)
    }
}
