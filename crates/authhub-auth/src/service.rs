//! The authentication facade.
//!
//! Ties credentials, lockout, sessions, resets, and mail delivery into
//! the five account flows the HTTP layer exposes.

use std::sync::Arc;

use tracing::{info, warn};

use authhub_core::config::{AuthConfig, MailConfig};
use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_core::traits::{Clock, Mailer};
use authhub_entity::user::{CredentialStore, NewUser, User};

use crate::lockout::LockoutPolicy;
use crate::password::{PasswordHasher, PasswordValidator};
use crate::reset::{RedeemOutcome, ResetTokenAuthority};
use crate::session::{IssuedSession, RevokeOutcome, SessionAuthority};

/// Input for account registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password, validated and hashed before storage.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Mobile phone number.
    pub mobile: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The issued bearer token.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

/// Facade over the complete credential and session lifecycle.
#[derive(Clone)]
pub struct AuthService {
    /// Credential storage backend.
    users: Arc<dyn CredentialStore>,
    /// Session issuance, validation, and revocation.
    sessions: Arc<SessionAuthority>,
    /// Password-reset token issuance and redemption.
    reset: ResetTokenAuthority,
    /// Argon2id password hashing.
    hasher: PasswordHasher,
    /// Password strength policy.
    validator: PasswordValidator,
    /// Brute-force lockout policy.
    lockout: LockoutPolicy,
    /// Outbound mail delivery.
    mailer: Arc<dyn Mailer>,
    /// Time source for lockout windows and token expiry.
    clock: Arc<dyn Clock>,
    /// Sender address and reset-link base for outgoing mail.
    mail_config: MailConfig,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("lockout", &self.lockout)
            .finish()
    }
}

impl AuthService {
    /// Creates the facade from its collaborators.
    pub fn new(
        users: Arc<dyn CredentialStore>,
        sessions: Arc<SessionAuthority>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        auth_config: &AuthConfig,
        mail_config: MailConfig,
    ) -> Self {
        Self {
            reset: ResetTokenAuthority::new(users.clone(), clock.clone(), auth_config),
            users,
            sessions,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(auth_config),
            lockout: LockoutPolicy::new(auth_config),
            mailer,
            clock,
            mail_config,
        }
    }

    /// The session authority, shared with the HTTP extractor.
    pub fn sessions(&self) -> &Arc<SessionAuthority> {
        &self.sessions
    }

    /// Registers a new account.
    ///
    /// The password must pass the strength policy; duplicate usernames
    /// or emails surface as `ErrorKind::Conflict` from the store.
    pub async fn register(&self, registration: Registration) -> AppResult<User> {
        self.validator.validate(&registration.password)?;

        let password_hash = self.hasher.hash_password(&registration.password).await?;
        let user = self
            .users
            .insert(&NewUser {
                username: registration.username,
                email: registration.email,
                password_hash,
                first_name: registration.first_name,
                last_name: registration.last_name,
                mobile: registration.mobile,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Authenticates a user and issues a session.
    ///
    /// The lockout window is checked before the password, so a locked
    /// account answers the same way whether or not the password is
    /// right. A wrong password bumps the failed-attempt counter; the
    /// attempt that crosses the threshold opens the lockout and is
    /// itself answered as locked.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let Some(user) = self.users.find_by_username(username).await? else {
            return Err(invalid_credentials());
        };

        let now = self.clock.now();
        if user.is_locked_at(now) {
            warn!(user_id = %user.id, "Login refused: account locked");
            return Err(account_locked());
        }

        if !self
            .hasher
            .verify_password(password, &user.password_hash)
            .await?
        {
            return Err(self.handle_failed_login(&user).await?);
        }

        self.users.reset_login_state(user.id).await?;
        let issued: IssuedSession = self.sessions.issue(user.id).await?;

        info!(user_id = %user.id, "Login successful");
        Ok(LoginResult {
            token: issued.token,
            user,
        })
    }

    /// Revokes the session behind the presented token.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        match self.sessions.revoke(token).await? {
            RevokeOutcome::Revoked => Ok(()),
            RevokeOutcome::NotFound => Err(AppError::unauthorized("Invalid session token")),
        }
    }

    /// Starts a password reset for the account behind `email`.
    ///
    /// The token is persisted before the mail goes out; a mail failure
    /// surfaces as `ErrorKind::ExternalService` but leaves the token
    /// redeemable.
    pub async fn forgot_password(&self, email: &str) -> AppResult<()> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Err(AppError::not_found("User not found"));
        };

        let issued = self.reset.issue(&user).await?;
        let link = self.mail_config.reset_link(&issued.token);
        let body = format!(
            "Hello {},\n\n\
             A password reset was requested for your account. Follow the \
             link below to choose a new password:\n\n\
             {link}\n\n\
             The link expires at {}. If you did not request this, you can \
             ignore this email.\n",
            user.first_name, issued.expires_at
        );

        self.mailer
            .send(&user.email, "Password Reset Request", &body)
            .await
            .map_err(|e| {
                warn!(user_id = %user.id, error = %e, "Reset mail delivery failed");
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to send password reset email",
                    e,
                )
            })?;

        info!(user_id = %user.id, "Password reset email sent");
        Ok(())
    }

    /// Completes a password reset with a previously issued token.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> AppResult<()> {
        let password_hash = self.hasher.hash_password(new_password).await?;

        match self.reset.redeem(token, &password_hash).await? {
            RedeemOutcome::Redeemed(user) => {
                info!(user_id = %user.id, "Password reset completed");
                Ok(())
            }
            RedeemOutcome::Invalid => Err(AppError::validation("Invalid or expired reset token")),
        }
    }

    /// Records a failed attempt and returns the error to answer with.
    async fn handle_failed_login(&self, user: &User) -> AppResult<AppError> {
        let attempts = self.users.increment_login_attempts(user.id).await?;

        if self.lockout.should_lock(attempts) {
            let until = self.lockout.lockout_until(self.clock.now());
            self.users.set_lockout(user.id, until).await?;
            warn!(user_id = %user.id, attempts, until = %until, "Account locked");
            return Ok(account_locked());
        }

        warn!(user_id = %user.id, attempts, "Failed login attempt");
        Ok(invalid_credentials())
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid username or password")
}

fn account_locked() -> AppError {
    AppError::forbidden("Account is locked due to too many failed login attempts")
}
