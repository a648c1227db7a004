use async_trait::async_trait;

use crate::errors::Result;

/// Out-of-band delivery of password reset secrets.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_otp(&self, email: &str, otp: &str) -> Result<()>;

    async fn send_reset_token(&self, email: &str, token: &str) -> Result<()>;
}

/// Writes the secret to the log instead of mailing it.
#[derive(Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_otp(&self, email: &str, otp: &str) -> Result<()> {
        tracing::info!("Generated OTP for {}: {} (valid for 5 minutes)", email, otp);
        Ok(())
    }

    async fn send_reset_token(&self, email: &str, token: &str) -> Result<()> {
        tracing::info!("Password reset token for {}: {} (valid for 1 hour)", email, token);
        Ok(())
    }
}
