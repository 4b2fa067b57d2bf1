//! SMTP delivery
//!
//! lettre-based async transport behind a small trait so the notifier can run
//! against a test double.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::core::config::SmtpConfig;

/// Errors that can occur when sending email
#[derive(Debug, Error)]
pub enum NotifyError {
    /// SMTP transport error
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Failed to build the email message
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// A composed message ready for delivery
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Abstract delivery so tests can inject failures
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, from: &str, email: &OutgoingEmail) -> Result<(), NotifyError>;
}

/// SMTP mailer over STARTTLS
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Create a mailer from configuration
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn deliver(&self, from: &str, email: &OutgoingEmail) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(
                from.parse()
                    .map_err(|_| NotifyError::InvalidAddress(from.to_string()))?,
            )
            .to(email
                .to
                .parse()
                .map_err(|_| NotifyError::InvalidAddress(email.to.clone()))?)
            .subject(email.subject.clone())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html.clone()),
                    ),
            )?;

        self.transport.send(message).await?;
        Ok(())
    }
}
