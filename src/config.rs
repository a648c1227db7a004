// config.rs
use std::env;
use std::str::FromStr;

use crate::errors::{AppError, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://lms.db?mode=rwc";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    /// Lifetime of issued bearer tokens, in seconds.
    pub jwt_expiration_secs: i64,
    pub bcrypt_cost: u32,
    pub port: u16,
    pub host: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::configuration("JWT_SECRET must be set"))?;
        if jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("JWT_SECRET must not be empty"));
        }

        let bcrypt_cost = parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::configuration("BCRYPT_COST must be between 4 and 31"));
        }

        let jwt_expiration_secs = parse_var("JWT_EXPIRATION_SECS", 3600i64)?;
        if jwt_expiration_secs <= 0 {
            return Err(AppError::configuration("JWT_EXPIRATION_SECS must be positive"));
        }

        Ok(AppConfig {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            jwt_secret,
            jwt_expiration_secs,
            bcrypt_cost,
            port: parse_var("PORT", 8080)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::configuration(format!("{} must be a number", name))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default_when_unset() {
        let value: u16 = parse_var("LMS_TEST_UNSET_VARIABLE", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: 1,
            jwt_secret: "secret".to_string(),
            jwt_expiration_secs: 3600,
            bcrypt_cost: 4,
            port: 9000,
            host: "127.0.0.1".to_string(),
        };
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
    }
}
