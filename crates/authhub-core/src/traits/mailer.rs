//! Mail delivery trait for outbound notifications.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for outbound mail transports (SMTP, log-only, or test doubles).
///
/// Delivery is fire-and-forget from the caller's perspective: a failed
/// send surfaces as `ErrorKind::ExternalService` and must never undo any
/// state the caller persisted before sending.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send a plain-text message to a single recipient.
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}
