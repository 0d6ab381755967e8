use crate::config::{ConfigError, EmailConfig};
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info, instrument};

/// Email service errors
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

/// Email message builder
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
    pub reply_to: Option<String>,
}

impl EmailMessage {
    pub fn new(to: String, subject: String) -> Self {
        Self {
            to,
            subject,
            text_body: None,
            html_body: None,
            reply_to: None,
        }
    }

    pub fn with_text_body(mut self, body: String) -> Self {
        self.text_body = Some(body);
        self
    }

    pub fn with_html_body(mut self, body: String) -> Self {
        self.html_body = Some(body);
        self
    }

    pub fn with_reply_to(mut self, address: String) -> Self {
        self.reply_to = Some(address);
        self
    }
}

/// SMTP email service implementation
pub struct SmtpEmailService {
    pub config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    #[instrument(skip(config), fields(host = %config.smtp_host, port = config.smtp_port))]
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        config.validate().map_err(EmailError::from)?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .timeout(Some(std::time::Duration::from_secs(
                    config.connection_timeout_secs,
                )));

        // STARTTLS upgrades the plain connection; Wrapper expects TLS from
        // the first byte
        builder = if config.use_tls {
            let tls = TlsParameters::new(config.smtp_host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS setup: {e}")))?;
            if config.use_starttls {
                builder.tls(Tls::Required(tls))
            } else {
                builder.tls(Tls::Wrapper(tls))
            }
        } else {
            builder.tls(Tls::None)
        };

        if !config.smtp_username.is_empty() && !config.smtp_password.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        let transport = builder.build();
        info!("SMTP transport ready");
        Ok(Self { config, transport })
    }

    #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
    pub async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        self.validate_email_address(&message.to)?;
        let email = self.build_message(message)?;

        self.transport.send(email).await.map_err(|e| {
            error!("email send failed: {e}");
            EmailError::SmtpError(e.to_string())
        })?;
        info!("email sent");
        Ok(())
    }

    /// Relay a contact-form message to the configured contact inbox. The
    /// visitor's address goes in Reply-To so staff can answer directly.
    #[instrument(skip(self, message), fields(from = %sender_email))]
    pub async fn send_contact_email(
        &self,
        sender_name: &str,
        sender_email: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), EmailError> {
        info!("Relaying contact form message from: {}", sender_email);

        self.validate_email_address(sender_email)?;

        let (text_body, html_body) =
            self.generate_contact_template(sender_name, sender_email, message);

        let email = EmailMessage::new(
            self.config.contact_email.clone(),
            format!("[Contact] {}", subject),
        )
        .with_text_body(text_body)
        .with_html_body(html_body)
        .with_reply_to(sender_email.to_string());

        self.send_email(email).await?;

        info!("Contact form message relayed successfully");
        Ok(())
    }

    /// Generate contact relay templates
    fn generate_contact_template(
        &self,
        sender_name: &str,
        sender_email: &str,
        message: &str,
    ) -> (String, String) {
        let text_body = format!(
            r#"New contact form message

From: {sender_name} <{sender_email}>

{message}

---
This message was submitted through the portal contact form. Reply to this
email to answer the sender directly."#,
            sender_name = sender_name,
            sender_email = sender_email,
            message = message,
        );

        let html_body = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Contact Form Message</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2 style="background-color: #f8f9fa; padding: 12px; border-radius: 4px;">New contact form message</h2>
    <p><strong>From:</strong> {sender_name} &lt;{sender_email}&gt;</p>
    <div style="background-color: #ffffff; padding: 16px; border: 1px solid #dee2e6; border-radius: 4px; white-space: pre-wrap;">{message}</div>
    <p style="font-size: 12px; color: #6c757d;">Submitted through the portal contact form. Reply to this email to answer the sender directly.</p>
</body>
</html>"#,
            sender_name = sender_name,
            sender_email = sender_email,
            message = message,
        );

        (text_body, html_body)
    }

    fn build_message(&self, message: EmailMessage) -> Result<Message, EmailError> {
        let parse_mailbox = |addr: &str, kind: &str| -> Result<Mailbox, EmailError> {
            addr.parse()
                .map_err(|e| EmailError::AddressError(format!("bad {kind} address: {e}")))
        };

        let from = parse_mailbox(
            &format!("{} <{}>", self.config.from_name, self.config.from_email),
            "from",
        )?;
        let mut builder = Message::builder()
            .from(from)
            .to(parse_mailbox(&message.to, "to")?)
            .subject(&message.subject);
        if let Some(reply_to) = &message.reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to, "reply-to")?);
        }

        let text_part = |body: &str| {
            SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(body.to_string())
        };
        let html_part = |body: &str| {
            SinglePart::builder()
                .header(ContentType::TEXT_HTML)
                .body(body.to_string())
        };

        let result = match (&message.text_body, &message.html_body) {
            (Some(text), Some(html)) => builder.multipart(
                MultiPart::alternative()
                    .singlepart(text_part(text))
                    .singlepart(html_part(html)),
            ),
            (Some(text), None) => builder.singlepart(text_part(text)),
            (None, Some(html)) => builder.singlepart(html_part(html)),
            (None, None) => {
                return Err(EmailError::MessageError("message has no body".to_string()))
            }
        };
        result.map_err(|e| EmailError::MessageError(e.to_string()))
    }

    /// Address sanity check before handing off to lettre
    fn validate_email_address(&self, address: &str) -> Result<(), EmailError> {
        if !validator::validate_email(address) {
            return Err(EmailError::AddressError(format!(
                "Invalid email address: {}",
                address
            )));
        }
        Ok(())
    }
}
