//! Server configuration
//!
//! Everything comes from the environment with sensible defaults. Bank and
//! store details are configuration on purpose: they belong to the company,
//! not to any order.

use tracing::warn;

/// Store server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    pub log_dir: Option<String>,
    /// SMTP transport; `None` puts the notifier into simulated mode
    pub smtp: Option<SmtpConfig>,
    pub from_address: String,
    pub admin_email: String,
    /// Base URL of the management view linked from admin alerts
    pub management_url: String,
    pub store: StoreInfo,
    pub bank: BankDetails,
    /// Quote requests allowed per client address per minute
    pub quote_rate_per_minute: u32,
}

/// SMTP credentials
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Company identity shown on invoices and emails
#[derive(Debug, Clone)]
pub struct StoreInfo {
    pub name: String,
    pub address: String,
    pub city: String,
    pub vat_id: String,
    pub email: String,
    pub phone: String,
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: "XTech Components".to_string(),
            address: "Calle de la Innovación 42".to_string(),
            city: "28020 Madrid, Spain".to_string(),
            vat_id: "ESB12345678".to_string(),
            email: "orders@xtechcomponents.com".to_string(),
            phone: "+34 910 000 000".to_string(),
        }
    }
}

/// Bank transfer details printed on invoices and confirmation mails
#[derive(Debug, Clone)]
pub struct BankDetails {
    pub account_holder: String,
    pub bank_name: String,
    pub iban: String,
    pub bic: String,
}

impl Default for BankDetails {
    fn default() -> Self {
        Self {
            account_holder: "XTech Components S.L.".to_string(),
            bank_name: "Banco Ejemplo".to_string(),
            iban: "ES12 0049 0001 5020 1122 3344".to_string(),
            bic: "BEXAESMMXXX".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            work_dir: env_or("WORK_DIR", "/var/lib/xtech/store"),
            http_port: env_parsed("HTTP_PORT", 3000),
            log_dir: std::env::var("LOG_DIR").ok(),
            smtp: SmtpConfig::from_env(),
            from_address: env_or(
                "MAIL_FROM",
                "XTech Components <noreply@xtechcomponents.com>",
            ),
            admin_email: env_or("ADMIN_EMAIL", "orders@xtechcomponents.com"),
            management_url: env_or("MANAGEMENT_URL", "https://admin.xtechcomponents.com"),
            store: StoreInfo::from_env(),
            bank: BankDetails::from_env(),
            quote_rate_per_minute: env_parsed("QUOTE_RATE_PER_MINUTE", 5),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl SmtpConfig {
    /// SMTP configuration, `None` when absent or incomplete
    fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        match (
            std::env::var("SMTP_USERNAME").ok(),
            std::env::var("SMTP_PASSWORD").ok(),
        ) {
            (Some(username), Some(password)) => Some(Self {
                host,
                port: env_parsed("SMTP_PORT", 587),
                username,
                password,
            }),
            _ => {
                warn!("SMTP_HOST is set but credentials are missing, outbound email disabled");
                None
            }
        }
    }
}

impl StoreInfo {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env_or("STORE_NAME", &defaults.name),
            address: env_or("STORE_ADDRESS", &defaults.address),
            city: env_or("STORE_CITY", &defaults.city),
            vat_id: env_or("STORE_VAT_ID", &defaults.vat_id),
            email: env_or("STORE_EMAIL", &defaults.email),
            phone: env_or("STORE_PHONE", &defaults.phone),
        }
    }
}

impl BankDetails {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            account_holder: env_or("BANK_ACCOUNT_HOLDER", &defaults.account_holder),
            bank_name: env_or("BANK_NAME", &defaults.bank_name),
            iban: env_or("BANK_IBAN", &defaults.iban),
            bic: env_or("BANK_BIC", &defaults.bic),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
