//! SMTP email provider using lettre.
//!
//! Without TLS this targets local capture servers such as Mailpit.

use super::{EmailContent, EmailProvider, SentEmail};
use crate::error::{NotificationError, NotificationResult};
use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub from_email: String,
    pub from_name: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Off for local dev servers
    pub use_tls: bool,
}

impl SmtpConfig {
    pub fn new(host: impl Into<String>, port: u16, from_email: impl Into<String>, from_name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            from_email: from_email.into(),
            from_name: from_name.into(),
            username: None,
            password: None,
            use_tls: false,
        }
    }

    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

impl FromEnv for SmtpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(
            env_or_default("SMTP_HOST", "localhost"),
            env_parse_or("SMTP_PORT", 1025)?,
            env_or_default("SMTP_FROM_EMAIL", "noreply@localhost"),
            env_or_default("SMTP_FROM_NAME", "Tenants"),
        )
        .with_tls(env_parse_or("SMTP_USE_TLS", false)?);

        if let (Ok(username), Ok(password)) =
            (std::env::var("SMTP_USERNAME"), std::env::var("SMTP_PASSWORD"))
        {
            config = config.with_credentials(username, password);
        }

        Ok(config)
    }
}

pub struct SmtpProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: SmtpConfig,
}

impl SmtpProvider {
    pub fn new(config: SmtpConfig) -> NotificationResult<Self> {
        let transport = Self::build_transport(&config)?;
        Ok(Self { transport, config })
    }

    fn build_transport(config: &SmtpConfig) -> NotificationResult<AsyncSmtpTransport<Tokio1Executor>> {
        let mut builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| NotificationError::ProviderError(format!("Failed to create SMTP relay: {e}")))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        }
        .port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(builder.build())
    }

    fn build_message(&self, email: &EmailContent) -> NotificationResult<Message> {
        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| NotificationError::InvalidEmail(format!("from address: {e}")))?;

        let to: Mailbox = if email.to_name.is_empty() {
            email.to_email.parse()
        } else {
            format!("{} <{}>", email.to_name, email.to_email).parse()
        }
        .map_err(|e| NotificationError::InvalidEmail(format!("{}: {e}", email.to_email)))?;

        let mut builder = Message::builder().from(from).to(to).subject(&email.subject);

        if let Some(reply_to) = &email.reply_to {
            let mailbox: Mailbox = reply_to
                .parse()
                .map_err(|e| NotificationError::InvalidEmail(format!("{reply_to}: {e}")))?;
            builder = builder.reply_to(mailbox);
        }

        builder
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .map_err(|e| NotificationError::ProviderError(format!("Failed to build email message: {e}")))
    }
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn send(&self, email: &EmailContent) -> NotificationResult<SentEmail> {
        debug!(
            to = %email.to_email,
            subject = %email.subject,
            host = %self.config.host,
            port = self.config.port,
            "Sending email via SMTP"
        );

        let message = self.build_message(email)?;
        let response = self.transport.send(message).await.map_err(|e| {
            error!(to = %email.to_email, error = %e, "SMTP send failed");
            NotificationError::ProviderError(format!("SMTP send failed: {e}"))
        })?;

        let message_id = response.message().next().map(str::to_string);
        info!(to = %email.to_email, message_id = ?message_id, "Email accepted by SMTP server");

        Ok(SentEmail {
            message_id,
            accepted: response.is_positive(),
        })
    }

    fn name(&self) -> &'static str {
        "SMTP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_from_env() {
        temp_env::with_vars_unset(
            [
                "SMTP_HOST",
                "SMTP_PORT",
                "SMTP_FROM_EMAIL",
                "SMTP_FROM_NAME",
                "SMTP_USERNAME",
                "SMTP_PASSWORD",
                "SMTP_USE_TLS",
            ],
            || {
                let config = SmtpConfig::from_env().unwrap();
                assert_eq!(config, SmtpConfig::new("localhost", 1025, "noreply@localhost", "Tenants"));
            },
        );
    }

    #[test]
    fn test_config_reads_credentials_and_tls() {
        temp_env::with_vars(
            [
                ("SMTP_HOST", Some("smtp.example.com")),
                ("SMTP_PORT", Some("587")),
                ("SMTP_USE_TLS", Some("true")),
                ("SMTP_USERNAME", Some("mailer")),
                ("SMTP_PASSWORD", Some("secret")),
            ],
            || {
                let config = SmtpConfig::from_env().unwrap();
                assert_eq!(config.port, 587);
                assert!(config.use_tls);
                assert_eq!(config.username.as_deref(), Some("mailer"));
            },
        );
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        temp_env::with_var("SMTP_PORT", Some("smtp"), || {
            assert!(matches!(
                SmtpConfig::from_env(),
                Err(ConfigError::ParseError { .. })
            ));
        });
    }

    #[test]
    fn test_message_has_both_parts() {
        let provider = SmtpProvider::new(SmtpConfig::new("localhost", 1025, "noreply@localhost", "Tenants")).unwrap();
        let email = EmailContent {
            to_email: "ada@example.com".into(),
            subject: "Verify".into(),
            html_body: "<p>hi</p>".into(),
            text_body: "hi".into(),
            ..Default::default()
        };

        let raw = String::from_utf8(provider.build_message(&email).unwrap().formatted()).unwrap();
        assert!(raw.contains("Subject: Verify"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_invalid_recipient_rejected() {
        let provider = SmtpProvider::new(SmtpConfig::new("localhost", 1025, "noreply@localhost", "Tenants")).unwrap();
        let email = EmailContent {
            to_email: "not an address".into(),
            ..Default::default()
        };

        assert!(matches!(
            provider.build_message(&email),
            Err(NotificationError::InvalidEmail(_))
        ));
    }
}
