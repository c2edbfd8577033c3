//! Utility functions and helpers

use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a prefixed resource id for fabricated records, e.g. `rec-3f2a9c1d`.
pub fn generate_mock_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &uuid[..8])
}

/// Milliseconds since the Unix epoch, used in mock identifiers.
pub fn timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
        && phone.len() >= 7
        && phone.len() <= 20
}

/// Mask all but the last four digits, for log lines.
pub fn mask_identifier(value: &str) -> String {
    let digits = value.chars().count();
    if digits <= 4 {
        return "*".repeat(digits);
    }
    value
        .chars()
        .enumerate()
        .map(|(i, c)| if i < digits - 4 { '*' } else { c })
        .collect()
}

/// Pseudo-random value in `[min, max]` for fabricated figures.
pub fn random_between(min: u32, max: u32) -> u32 {
    use rand::Rng;
    if min >= max {
        return min;
    }
    rand::thread_rng().gen_range(min..=max)
}

/// Artificial delay used by the in-memory services to emulate network latency.
///
/// Only the awaiting call is delayed; concurrent calls are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    enabled: bool,
}

impl MockLatency {
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    pub const fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn from_flag(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn pause(&self, millis: u64) {
        if self.enabled && millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn mock_ids_are_prefixed_and_unique() {
        let a = generate_mock_id("rec");
        let b = generate_mock_id("rec");
        assert!(a.starts_with("rec-"));
        assert_eq!(a.len(), "rec-".len() + 8);
        assert_ne!(a, b);
    }

    #[test]
    fn phone_validation() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("+91 98765 43210"));
        assert!(!is_valid_phone("12ab"));
    }

    #[test]
    fn masking_keeps_last_four() {
        assert_eq!(mask_identifier("123456789012"), "********9012");
        assert_eq!(mask_identifier("123"), "***");
    }

    #[test]
    fn random_between_stays_in_range() {
        for _ in 0..50 {
            let v = random_between(3, 7);
            assert!((3..=7).contains(&v));
        }
        assert_eq!(random_between(5, 5), 5);
    }

    #[tokio::test]
    async fn disabled_latency_returns_immediately() {
        let start = Instant::now();
        MockLatency::disabled().pause(2_000).await;
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn enabled_latency_sleeps() {
        let start = Instant::now();
        MockLatency::enabled().pause(50).await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
