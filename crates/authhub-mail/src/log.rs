//! Log-only mail transport.
//!
//! Used when no SMTP relay is configured. Messages land in the
//! structured log instead of a mailbox, which keeps the reset flow
//! usable in development.

use async_trait::async_trait;
use tracing::info;

use authhub_core::result::AppResult;
use authhub_core::traits::Mailer;

/// Writes outbound mail to the log instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl LogMailer {
    /// Creates a new log-only mailer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        info!(to = %to, subject = %subject, body = %body, "Mail delivery skipped (no SMTP relay configured)");
        Ok(())
    }
}
