use bcrypt::{hash, verify};

use crate::errors::Result;

/// Hash a password with bcrypt at the given cost
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(hash(password, cost)?)
}

/// Verify a password against a bcrypt hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    Ok(verify(password, password_hash)?)
}
