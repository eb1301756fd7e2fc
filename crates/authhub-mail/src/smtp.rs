//! SMTP mail delivery via the `lettre` async transport.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use authhub_core::config::MailConfig;
use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_core::traits::Mailer;

/// Sends plain-text mail over SMTP with STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl SmtpMailer {
    /// Builds the transport from mail configuration. Fails when the
    /// relay hostname cannot be resolved into a transport.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid SMTP relay '{}'", config.smtp_host),
                    e,
                )
            })?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let message = Message::builder()
            .from(self.from_address.parse().map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid from address '{}'", self.from_address),
                    e,
                )
            })?)
            .to(to.parse().map_err(|e| {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Invalid recipient address '{to}'"),
                    e,
                )
            })?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build email message", e)
            })?;

        self.transport.send(message).await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "SMTP delivery failed", e)
        })?;

        info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_unparseable_recipient() {
        let config = MailConfig {
            smtp_host: "localhost".into(),
            ..MailConfig::default()
        };
        let mailer = SmtpMailer::new(&config).unwrap();

        let err = mailer
            .send("not an address", "Subject", "Body")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
