//! Outbound transactional email
//!
//! Everything here is fire-and-forget from the caller's point of view:
//! [`Notifier::send`] never returns an error. Without SMTP credentials the
//! notifier runs in simulated mode and reports success with
//! `simulated = true`; with a transport, delivery failures are logged and
//! reported as `success = false`. Either way the calling workflow proceeds.

pub mod mailer;
pub mod templates;

use std::sync::Arc;

use tracing::{info, warn};

use shared::models::Order;
use shared::request::QuoteRequest;

use crate::core::config::{BankDetails, Config};
use mailer::{MailTransport, OutgoingEmail};
use templates::EmailContent;

pub use mailer::{NotifyError, SmtpMailer};

/// Result of a send attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOutcome {
    pub success: bool,
    /// True when no transport is configured and the send was a no-op
    pub simulated: bool,
}

/// Best-effort email dispatcher
#[derive(Clone)]
pub struct Notifier {
    transport: Option<Arc<dyn MailTransport>>,
    from_address: String,
    admin_email: String,
    management_url: String,
    bank: BankDetails,
}

impl Notifier {
    pub fn new(
        transport: Option<Arc<dyn MailTransport>>,
        from_address: impl Into<String>,
        admin_email: impl Into<String>,
        management_url: impl Into<String>,
        bank: BankDetails,
    ) -> Self {
        Self {
            transport,
            from_address: from_address.into(),
            admin_email: admin_email.into(),
            management_url: management_url.into(),
            bank,
        }
    }

    /// Build a notifier from server configuration
    pub fn from_config(config: &Config, transport: Option<Arc<dyn MailTransport>>) -> Self {
        Self::new(
            transport,
            config.from_address.clone(),
            config.admin_email.clone(),
            config.management_url.clone(),
            config.bank.clone(),
        )
    }

    /// Notifier without a transport: every send is a simulated success
    pub fn simulated() -> Self {
        Self::new(
            None,
            "noreply@xtechcomponents.example",
            "orders@xtechcomponents.example",
            "https://admin.xtechcomponents.example",
            BankDetails::default(),
        )
    }

    /// Send one message, never failing the caller
    ///
    /// Both outcomes — simulated no-op and transport failure — are reported
    /// through [`SendOutcome`] and must be treated as fire-and-forget.
    pub async fn send(&self, to: &str, subject: &str, html: &str, text: &str) -> SendOutcome {
        let Some(transport) = &self.transport else {
            info!(to = %to, subject = %subject, "Email transport not configured, simulating send");
            return SendOutcome { success: true, simulated: true };
        };

        let email = OutgoingEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
            html: html.to_string(),
        };
        match transport.deliver(&self.from_address, &email).await {
            Ok(()) => {
                info!(to = %to, subject = %subject, "Email sent");
                SendOutcome { success: true, simulated: false }
            }
            Err(e) => {
                warn!(to = %to, subject = %subject, error = %e, "Email delivery failed");
                SendOutcome { success: false, simulated: false }
            }
        }
    }

    async fn send_content(&self, to: &str, content: EmailContent) -> SendOutcome {
        self.send(to, &content.subject, &content.html, &content.text)
            .await
    }

    // ========== Order templates ==========

    /// Customer order confirmation: items, total, bank details, reference
    pub async fn order_confirmation(&self, order: &Order) -> SendOutcome {
        let content = templates::order_confirmation(order, &self.bank);
        self.send_content(&order.user_email, content).await
    }

    /// Admin alert for a new order: customer contact, items, management link
    pub async fn admin_order_alert(&self, order: &Order) -> SendOutcome {
        let content = templates::admin_order_alert(order, &self.management_url);
        self.send_content(&self.admin_email, content).await
    }

    /// Customer status-change notification
    ///
    /// The template is generated and tested, but nothing dispatches it
    /// automatically yet — status changes stay silent until this is wired to
    /// the update path.
    pub async fn status_change(&self, order: &Order) -> SendOutcome {
        let content = templates::status_change(order);
        self.send_content(&order.user_email, content).await
    }

    // ========== Quote templates ==========

    /// Confirmation for a quote request
    pub async fn quote_confirmation(&self, quote: &QuoteRequest, quote_ref: &str) -> SendOutcome {
        let content = templates::quote_confirmation(quote, quote_ref);
        self.send_content(&quote.email, content).await
    }

    /// Admin alert for a quote request
    pub async fn quote_admin_alert(&self, quote: &QuoteRequest, quote_ref: &str) -> SendOutcome {
        let content = templates::quote_admin_alert(quote, quote_ref, &self.management_url);
        self.send_content(&self.admin_email, content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingTransport {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn deliver(&self, _from: &str, email: &OutgoingEmail) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::InvalidAddress("refused".to_string()));
            }
            self.sent.lock().unwrap().push(email.to.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn unconfigured_transport_simulates_success() {
        let notifier = Notifier::simulated();
        let outcome = notifier.send("a@example.com", "Hi", "<p>Hi</p>", "Hi").await;
        assert!(outcome.success);
        assert!(outcome.simulated);
    }

    #[tokio::test]
    async fn transport_failure_is_reported_not_raised() {
        let transport = Arc::new(RecordingTransport { sent: Mutex::new(Vec::new()), fail: true });
        let notifier = Notifier::new(
            Some(transport),
            "noreply@example.com",
            "admin@example.com",
            "https://admin.example.com",
            BankDetails::default(),
        );
        let outcome = notifier.send("a@example.com", "Hi", "<p>Hi</p>", "Hi").await;
        assert!(!outcome.success);
        assert!(!outcome.simulated);
    }

    #[tokio::test]
    async fn successful_delivery_goes_to_the_recipient() {
        let transport = Arc::new(RecordingTransport { sent: Mutex::new(Vec::new()), fail: false });
        let notifier = Notifier::new(
            Some(transport.clone()),
            "noreply@example.com",
            "admin@example.com",
            "https://admin.example.com",
            BankDetails::default(),
        );
        let outcome = notifier.send("a@example.com", "Hi", "<p>Hi</p>", "Hi").await;
        assert!(outcome.success);
        assert_eq!(*transport.sent.lock().unwrap(), vec!["a@example.com"]);
    }
}
