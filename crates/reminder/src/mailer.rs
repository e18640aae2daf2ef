//! Outbound mail port and its SMTP adapter.
//!
//! One message per call, no internal retry: a failed dispatch leaves the
//! record unmarked and the next scheduled run picks it up again.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use evalsys_common::config::AppConfig;
use evalsys_common::error::AppError;

/// Sender identity used when `MAIL_FROM` is not configured.
const DEFAULT_FROM: &str = "Evaluation System Team <noreply@yourdomain.com>";

/// A composed plain-text message ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Transport the job dispatches reminders through.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Transmit one message. Errors propagate to the caller; retry is the
    /// next scheduled invocation, never this component.
    async fn send(&self, email: &OutboundEmail) -> Result<(), AppError>;
}

/// SMTP relay adapter (STARTTLS). Credentials are checked before any
/// connection is opened: missing credentials fail the dispatch instead of
/// sending unauthenticated mail.
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Option<(String, String)>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            credentials: config.smtp_user.clone().zip(config.smtp_pass.clone()),
            from: config
                .mail_from
                .clone()
                .unwrap_or_else(|| DEFAULT_FROM.to_string()),
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), AppError> {
        let (user, pass) = self.credentials.as_ref().ok_or_else(|| {
            AppError::Auth("SMTP credentials are not configured; refusing to send".into())
        })?;

        let message = Message::builder()
            .from(self
                .from
                .parse()
                .map_err(|e| AppError::Send(format!("invalid sender mailbox: {e}")))?)
            .to(email
                .to
                .parse()
                .map_err(|e| AppError::Send(format!("invalid recipient {}: {e}", email.to)))?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| AppError::Send(format!("failed to build message: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| AppError::Send(format!("invalid relay {}: {e}", self.host)))?
            .port(self.port)
            .credentials(Credentials::new(user.clone(), pass.clone()))
            .build();

        transport
            .send(message)
            .await
            .map_err(|e| AppError::Send(format!("relay rejected message: {e}")))?;

        Ok(())
    }
}
