//! Brute-force lockout policy.
//!
//! Pure decision logic over the failed-attempt counter; the store owns
//! the counter itself and the facade applies the verdicts.

use chrono::{DateTime, Duration, Utc};

use authhub_core::config::AuthConfig;

/// Decides when an account locks and for how long.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Failed attempts at which the lockout opens.
    max_failed_attempts: i32,
    /// Length of the lockout window in minutes.
    lockout_duration_minutes: i64,
}

impl LockoutPolicy {
    /// Creates a new policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            max_failed_attempts: config.max_failed_attempts,
            lockout_duration_minutes: config.lockout_duration_minutes as i64,
        }
    }

    /// Whether the given post-increment attempt count crosses the
    /// lockout threshold.
    pub fn should_lock(&self, failed_attempts: i32) -> bool {
        failed_attempts >= self.max_failed_attempts
    }

    /// The instant a lockout opened at `now` should end.
    pub fn lockout_until(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::minutes(self.lockout_duration_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> LockoutPolicy {
        LockoutPolicy::new(&AuthConfig::default())
    }

    #[test]
    fn locks_at_threshold_not_before() {
        let policy = policy();
        assert!(!policy.should_lock(4));
        assert!(policy.should_lock(5));
        assert!(policy.should_lock(6));
    }

    #[test]
    fn window_length_follows_config() {
        let now = Utc::now();
        assert_eq!(policy().lockout_until(now), now + Duration::minutes(10));
    }
}
