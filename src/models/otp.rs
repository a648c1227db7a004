use chrono::{DateTime, Utc};

/// A pending one-time code for one email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEntry {
    pub code: String,           // 6-digit OTP
    pub issued_at: DateTime<Utc>, // When OTP was created
}
