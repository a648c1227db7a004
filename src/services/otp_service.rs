use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::models::otp::OtpEntry;

const SHARD_COUNT: usize = 16;

pub fn otp_validity() -> Duration {
    Duration::minutes(5)
}

/// In-memory one-time codes keyed by email.
///
/// The map is split into independently locked shards; every read-then-remove
/// for one email runs under that email's shard lock, so a code can be
/// consumed at most once even under concurrent requests. Entries are lost on
/// restart.
pub struct OtpStore {
    shards: Vec<Mutex<HashMap<String, OtpEntry>>>,
    validity: Duration,
}

impl Default for OtpStore {
    fn default() -> Self {
        Self::new(otp_validity())
    }
}

impl OtpStore {
    pub fn new(validity: Duration) -> Self {
        Self {
            shards: (0..SHARD_COUNT).map(|_| Mutex::new(HashMap::new())).collect(),
            validity,
        }
    }

    // Generate 6-digit OTP
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        format!("{:06}", rng.gen_range(0..1_000_000))
    }

    pub fn generate(&self, email: &str) -> String {
        self.generate_at(email, Utc::now())
    }

    /// Draws a fresh code for `email`, replacing any pending one.
    pub fn generate_at(&self, email: &str, now: DateTime<Utc>) -> String {
        let code = Self::generate_code();
        self.insert_at(email, &code, now);
        code
    }

    pub(crate) fn insert_at(&self, email: &str, code: &str, now: DateTime<Utc>) {
        self.shard(email).insert(
            email.to_string(),
            OtpEntry {
                code: code.to_string(),
                issued_at: now,
            },
        );
    }

    pub fn validate(&self, email: &str, code: &str) -> bool {
        self.validate_at(email, code, Utc::now())
    }

    /// Fails closed. An expired entry is evicted on sight, a matching entry
    /// is evicted on use, a mismatch leaves the entry in place.
    pub fn validate_at(&self, email: &str, code: &str, now: DateTime<Utc>) -> bool {
        let mut shard = self.shard(email);

        let (expired, matches) = match shard.get(email) {
            Some(entry) => (now - entry.issued_at > self.validity, entry.code == code),
            None => return false,
        };

        if expired {
            shard.remove(email);
            tracing::debug!("OTP for {} expired", email);
            return false;
        }

        if matches {
            shard.remove(email);
        }
        matches
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, email: &str) -> bool {
        self.shard(email).contains_key(email)
    }

    fn shard(&self, email: &str) -> MutexGuard<'_, HashMap<String, OtpEntry>> {
        let mut hasher = DefaultHasher::new();
        email.hash(&mut hasher);
        let index = (hasher.finish() as usize) % self.shards.len();
        self.shards[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generated_code_is_six_digits() {
        for _ in 0..200 {
            let code = OtpStore::generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_validate_succeeds_once_within_window() {
        let store = OtpStore::default();
        store.insert_at("a@x.com", "482913", t0());

        let at = t0() + Duration::minutes(4) + Duration::seconds(59);
        assert!(store.validate_at("a@x.com", "482913", at));
        assert!(!store.validate_at("a@x.com", "482913", at));
        assert!(!store.contains("a@x.com"));
    }

    #[test]
    fn test_validate_after_window_fails_and_evicts() {
        let store = OtpStore::default();
        store.insert_at("a@x.com", "482913", t0());

        let at = t0() + Duration::minutes(5) + Duration::seconds(1);
        assert!(!store.validate_at("a@x.com", "482913", at));
        assert!(!store.contains("a@x.com"));

        // a new code starts fresh
        let code = store.generate_at("a@x.com", at);
        assert!(store.validate_at("a@x.com", &code, at + Duration::minutes(1)));
    }

    #[test]
    fn test_exactly_five_minutes_is_still_valid() {
        let store = OtpStore::default();
        store.insert_at("a@x.com", "123456", t0());
        assert!(store.validate_at("a@x.com", "123456", t0() + Duration::minutes(5)));
    }

    #[test]
    fn test_mismatch_keeps_entry() {
        let store = OtpStore::default();
        store.insert_at("a@x.com", "111111", t0());

        assert!(!store.validate_at("a@x.com", "222222", t0()));
        assert!(store.contains("a@x.com"));
        assert!(store.validate_at("a@x.com", "111111", t0()));
    }

    #[test]
    fn test_unknown_email_fails() {
        let store = OtpStore::default();
        assert!(!store.validate_at("nobody@x.com", "000000", t0()));
    }

    #[test]
    fn test_regenerate_overwrites_previous_code() {
        let store = OtpStore::default();
        store.insert_at("a@x.com", "111111", t0());
        store.insert_at("a@x.com", "222222", t0() + Duration::minutes(1));

        assert!(!store.validate_at("a@x.com", "111111", t0() + Duration::minutes(2)));
        assert!(store.validate_at("a@x.com", "222222", t0() + Duration::minutes(2)));
    }

    #[test]
    fn test_codes_are_per_email() {
        let store = OtpStore::default();
        store.insert_at("a@x.com", "111111", t0());
        store.insert_at("b@x.com", "222222", t0());

        assert!(!store.validate_at("a@x.com", "222222", t0()));
        assert!(store.validate_at("b@x.com", "222222", t0()));
        assert!(store.validate_at("a@x.com", "111111", t0()));
    }

    #[test]
    fn test_concurrent_validation_consumes_once() {
        let store = Arc::new(OtpStore::default());
        let now = Utc::now();
        store.insert_at("race@x.com", "654321", now);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.validate_at("race@x.com", "654321", now))
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
    }
}
