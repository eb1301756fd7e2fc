//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user account.
///
/// Mutated by login attempts, lockouts, and password resets; never
/// hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Mobile phone number.
    pub mobile: String,
    /// Number of consecutive failed login attempts.
    pub login_attempts: i32,
    /// Account locked until this time (if a lockout window is open).
    pub locked_until: Option<DateTime<Utc>>,
    /// Outstanding password-reset token, if one was requested.
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
    /// Expiry of the outstanding reset token.
    pub reset_token_expires: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check whether the account is locked at the given instant.
    ///
    /// The lockout interval is half-open: `locked_until` equal to `now`
    /// means the window has already elapsed.
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        match self.locked_until {
            Some(locked_until) => now < locked_until,
            None => false,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Mobile phone number.
    pub mobile: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user_locked_until(locked_until: Option<DateTime<Utc>>) -> User {
        User {
            id: Uuid::new_v4(),
            username: "omkar".into(),
            email: "omkar@example.com".into(),
            password_hash: "$argon2id$stub".into(),
            first_name: "Omkar".into(),
            last_name: "B".into(),
            mobile: "1234567890".into(),
            login_attempts: 0,
            locked_until,
            reset_token: None,
            reset_token_expires: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn unlocked_without_window() {
        let now = Utc::now();
        assert!(!user_locked_until(None).is_locked_at(now));
    }

    #[test]
    fn locked_while_window_open() {
        let now = Utc::now();
        let user = user_locked_until(Some(now + Duration::minutes(5)));
        assert!(user.is_locked_at(now));
    }

    #[test]
    fn boundary_instant_is_unlocked() {
        let now = Utc::now();
        let user = user_locked_until(Some(now));
        assert!(!user.is_locked_at(now));
    }

    #[test]
    fn past_window_is_unlocked() {
        let now = Utc::now();
        let user = user_locked_until(Some(now - Duration::seconds(1)));
        assert!(!user.is_locked_at(now));
    }
}
