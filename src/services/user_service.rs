use chrono::Utc;
use sqlx::SqlitePool;

use crate::dtos::auth_dtos::RegisterRequest;
use crate::errors::{AppError, Result};
use crate::models::user::{Role, User};
use crate::services::password::{hash_password, verify_password};

const USER_COLUMNS: &str = "user_id, username, email, password_hash, role, created_at";

#[derive(Clone)]
pub struct UserService {
    db: SqlitePool,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(db: SqlitePool, bcrypt_cost: u32) -> Self {
        Self { db, bcrypt_cost }
    }

    /// Email is checked before username, so a request clashing on both
    /// reports the email.
    pub async fn register(&self, req: &RegisterRequest) -> Result<User> {
        if self.exists_by("email", &req.email).await? {
            return Err(AppError::already_exists("Email already exists"));
        }
        if self.exists_by("username", &req.username).await? {
            return Err(AppError::already_exists("Username already exists"));
        }

        let password_hash = hash_password(&req.password, self.bcrypt_cost)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash, role, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(&req.username)
        .bind(&req.email)
        .bind(&password_hash)
        .bind(req.role)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_insert(e, "User"))?;

        tracing::debug!("Registered new user {} ({})", user.username, user.role);
        Ok(user)
    }

    async fn exists_by(&self, column: &'static str, value: &str) -> Result<bool> {
        let row: Option<(i64,)> =
            sqlx::query_as(&format!("SELECT user_id FROM users WHERE {column} = ?"))
                .bind(value)
                .fetch_optional(&self.db)
                .await?;
        Ok(row.is_some())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
            .bind(username)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("User not found with username: {}", username))
            })
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
                .bind(email)
                .fetch_optional(&self.db)
                .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: i64) -> Result<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?"))
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    pub async fn list_by_role(&self, role: Option<Role>) -> Result<Vec<User>> {
        let users = match role {
            Some(role) => {
                sqlx::query_as::<_, User>(&format!(
                    "SELECT {USER_COLUMNS} FROM users WHERE role = ? ORDER BY user_id"
                ))
                .bind(role)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, User>(&format!(
                    "SELECT {USER_COLUMNS} FROM users ORDER BY user_id"
                ))
                .fetch_all(&self.db)
                .await?
            }
        };
        Ok(users)
    }

    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let user = match self.find_by_username(username).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => return Err(AppError::InvalidCredential),
            Err(e) => return Err(e),
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!("Invalid credentials provided for username: {}", username);
            return Err(AppError::InvalidCredential);
        }

        Ok(user)
    }

    pub async fn update_password(&self, email: &str, new_password: &str) -> Result<()> {
        let password_hash = hash_password(new_password, self.bcrypt_cost)?;

        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE email = ?")
            .bind(&password_hash)
            .bind(email)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        tracing::info!("Password updated successfully for user: {}", email);
        Ok(())
    }

    /// Removes the user and, through cascading keys, everything they own.
    pub async fn delete(&self, user_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        tracing::info!("Deleted user {}", user_id);
        Ok(())
    }
}
