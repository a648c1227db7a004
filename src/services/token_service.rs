use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::models::user::{Claims, Role};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature does not match")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token generation failed: {0}")]
    Encoding(String),
}

/// Mints and checks HS256 bearer tokens.
///
/// Tokens are stateless: a token is valid exactly when its signature matches
/// the current secret and the clock is before its `exp`. There is no
/// revocation list, so swapping `JWT_SECRET` is the only way to kill
/// outstanding tokens early.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(
        &self,
        username: &str,
        role: Role,
        email: &str,
        user_id: i64,
    ) -> Result<String, TokenError> {
        self.issue_at(username, role, email, user_id, Utc::now())
    }

    pub fn issue_at(
        &self,
        username: &str,
        role: Role,
        email: &str,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Encoding("Failed to calculate expiration".to_string()))?;

        let claims = Claims {
            sub: username.to_string(),
            role,
            email: email.to_string(),
            user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        tracing::debug!(
            "Issued token for {} ({}), expires at {}",
            username,
            role,
            expires_at.to_rfc3339()
        );
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Signature is checked first; expiry is checked against `now` without
    /// any leeway, failing once `now >= exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        if now.timestamp() >= token_data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn issuer(secret: &str) -> TokenIssuer {
        TokenIssuer::new(secret, Duration::hours(1))
    }

    #[test]
    fn test_issue_and_verify_carries_claims() {
        let issuer = issuer("test-jwt-secret");
        let token = issuer
            .issue_at("alice", Role::Instructor, "alice@example.com", 7, t0())
            .unwrap();
        let claims = issuer.verify_at(&token, t0()).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, Role::Instructor);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.iat, t0().timestamp());
        assert_eq!(claims.exp, (t0() + Duration::hours(1)).timestamp());
    }

    #[test]
    fn test_valid_at_59_minutes_expired_at_61() {
        let issuer = issuer("test-jwt-secret");
        let token = issuer
            .issue_at("alice", Role::Student, "alice@example.com", 1, t0())
            .unwrap();

        assert!(issuer.verify_at(&token, t0() + Duration::minutes(59)).is_ok());
        assert_eq!(
            issuer.verify_at(&token, t0() + Duration::minutes(61)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_expires_exactly_at_exp() {
        let issuer = issuer("test-jwt-secret");
        let token = issuer
            .issue_at("alice", Role::Student, "alice@example.com", 1, t0())
            .unwrap();

        assert!(issuer
            .verify_at(&token, t0() + Duration::hours(1) - Duration::seconds(1))
            .is_ok());
        assert_eq!(
            issuer.verify_at(&token, t0() + Duration::hours(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let token = issuer("secret-1")
            .issue_at("alice", Role::Admin, "alice@example.com", 1, t0())
            .unwrap();
        assert_eq!(
            issuer("secret-2").verify_at(&token, t0()),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let token = issuer("secret-1")
            .issue_at("alice", Role::Admin, "alice@example.com", 1, t0())
            .unwrap();
        assert_eq!(
            issuer("secret-2").verify_at(&token, t0() + Duration::days(2)),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let result = issuer("secret").verify_at("not.a.token", t0());
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let issuer = issuer("secret");
        let token = issuer
            .issue_at("alice", Role::Student, "alice@example.com", 1, t0())
            .unwrap();
        let other = issuer
            .issue_at("mallory", Role::Admin, "m@example.com", 2, t0())
            .unwrap();

        // alice's header and signature around mallory's payload
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert_eq!(
            issuer.verify_at(&forged, t0()),
            Err(TokenError::InvalidSignature)
        );
    }
}
