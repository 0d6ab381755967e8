use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

use crate::config::{env_or, require_env, ConfigError};

/// SMTP settings for the contact-form relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub use_tls: bool,
    pub use_starttls: bool,
    pub from_email: String,
    pub from_name: String,
    /// Inbox receiving contact-form messages
    pub contact_email: String,
    pub connection_timeout_secs: u64,
}

impl EmailConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let from_email = require_env("SMTP_FROM_EMAIL")?;
        let contact_email = env::var("CONTACT_EMAIL").unwrap_or_else(|_| {
            warn!("CONTACT_EMAIL not set; relaying contact messages to the From address");
            from_email.clone()
        });

        Ok(EmailConfig {
            smtp_host: require_env("SMTP_HOST")?,
            smtp_port: env_or("SMTP_PORT", 587)?,
            smtp_username: require_env("SMTP_USERNAME")?,
            smtp_password: require_env("SMTP_PASSWORD")?,
            use_tls: env_or("SMTP_USE_TLS", true)?,
            use_starttls: env_or("SMTP_USE_STARTTLS", true)?,
            from_email,
            from_name: env::var("SMTP_FROM_NAME")
                .unwrap_or_else(|_| "OpenScholar Portal".to_string()),
            contact_email,
            connection_timeout_secs: env_or("SMTP_CONNECTION_TIMEOUT", 30)?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.smtp_host.is_empty() {
            return Err(ConfigError::ValidationError(
                "SMTP host cannot be empty".to_string(),
            ));
        }
        for (label, addr) in [("from", &self.from_email), ("contact", &self.contact_email)] {
            if addr.is_empty() || !addr.contains('@') {
                return Err(ConfigError::ValidationError(format!(
                    "{label} email address is invalid"
                )));
            }
        }
        Ok(())
    }
}
