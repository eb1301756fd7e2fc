//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// SMTP delivery and reset-link configuration.
///
/// An empty `smtp_host` means mail delivery is not configured; the server
/// then falls back to a log-only mailer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// SMTP server hostname. Empty disables SMTP delivery.
    #[serde(default)]
    pub smtp_host: String,
    /// SMTP server port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Optional SMTP username.
    #[serde(default)]
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    #[serde(default)]
    pub smtp_password: Option<String>,
    /// Base URL for password-reset links; the token is appended as a
    /// `token` query parameter.
    #[serde(default = "default_reset_link_base")]
    pub reset_link_base: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            from_address: default_from_address(),
            smtp_user: None,
            smtp_password: None,
            reset_link_base: default_reset_link_base(),
        }
    }
}

impl MailConfig {
    /// Whether SMTP delivery is configured.
    pub fn smtp_enabled(&self) -> bool {
        !self.smtp_host.is_empty()
    }

    /// Build the reset link for the given token.
    pub fn reset_link(&self, token: &str) -> String {
        format!("{}?token={}", self.reset_link_base, token)
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "noreply@authhub.local".to_string()
}

fn default_reset_link_base() -> String {
    "http://localhost:3000/reset-password".to_string()
}
