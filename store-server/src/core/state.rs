//! Server state
//!
//! Service handles are constructed once at process start and passed around
//! explicitly — every collaborator shows up in a constructor, no hidden
//! singletons.

use std::path::Path;
use std::sync::Arc;

use crate::core::config::Config;
use crate::invoice::InvoiceRenderer;
use crate::notify::mailer::MailTransport;
use crate::notify::{Notifier, SmtpMailer};
use crate::orders::{OrderService, OrderStore};
use crate::utils::rate_limit::ClientRateLimiter;

/// Shared handles for the HTTP layer
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub orders: Arc<OrderService>,
    pub notifier: Notifier,
    pub quote_limiter: Arc<ClientRateLimiter>,
}

impl ServerState {
    /// Build all services from configuration
    pub fn initialize(config: Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let store = OrderStore::open(Path::new(&config.work_dir).join("orders.redb"))?;

        let transport: Option<Arc<dyn MailTransport>> = match &config.smtp {
            Some(smtp) => Some(Arc::new(SmtpMailer::new(smtp)?)),
            None => {
                tracing::info!("No SMTP configuration, notifications run in simulated mode");
                None
            }
        };
        let notifier = Notifier::from_config(&config, transport);
        let invoices = InvoiceRenderer::new(config.store.clone(), config.bank.clone());

        let orders = Arc::new(OrderService::new(store, notifier.clone(), invoices));
        let quote_limiter = Arc::new(ClientRateLimiter::per_minute(config.quote_rate_per_minute));

        Ok(Self {
            config: Arc::new(config),
            orders,
            notifier,
            quote_limiter,
        })
    }
}
