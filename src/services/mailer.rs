// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! SMTP mail transport.
//!
//! One capability: send a single notification email. The transport is built
//! once at startup from environment configuration and shared read-only
//! across requests. No retry, no queueing, no delivery tracking beyond the
//! provider's initial acceptance.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::env;
use std::time::Duration;

/// Outbound SMTP timeout. Bounds worst-case request latency when the
/// provider is unreachable.
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for the mail transport.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_secure: bool,
    pub smtp_user: String,
    pub smtp_pass: String,
    /// Display name for the From header; the address is always `smtp_user`.
    pub from_name: Option<String>,
    /// Default recipient for all notification mail.
    pub to: String,
}

fn env_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
}

impl MailerConfig {
    /// Load mail configuration from environment variables.
    /// `SMTP_SECURE` defaults to true when the port is 465 (implicit TLS).
    pub fn from_env() -> Result<Self> {
        let smtp_port: u16 = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "465".to_string())
            .parse()
            .context("SMTP_PORT must be a valid port number")?;
        let smtp_user = env::var("SMTP_USER").context("SMTP_USER must be set")?;

        Ok(Self {
            smtp_host: env::var("SMTP_HOST").context("SMTP_HOST must be set")?,
            smtp_port,
            smtp_secure: env::var("SMTP_SECURE")
                .map(|v| env_truthy(&v))
                .unwrap_or(smtp_port == 465),
            smtp_pass: env::var("SMTP_PASS").context("SMTP_PASS must be set")?,
            from_name: env::var("FROM_NAME")
                .or_else(|_| env::var("SMTP_FROM"))
                .ok(),
            to: env::var("CONTACT_TO")
                .or_else(|_| env::var("SMTP_TO"))
                .unwrap_or_else(|_| smtp_user.clone()),
            smtp_user,
        })
    }
}

/// A single outbound notification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
    pub reply_to: Option<String>,
}

/// Mail-sending capability. Route handlers depend on this trait so tests can
/// substitute a recording fake for the real SMTP transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one email. Returns the provider-assigned message id, or
    /// `"ok"` when the provider does not supply one.
    async fn send(&self, email: &OutgoingEmail) -> Result<String>;
}

/// Lettre-backed SMTP implementation of [`Mailer`].
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_mailbox: Mailbox,
    to_mailbox: Mailbox,
}

impl SmtpMailer {
    /// Build the SMTP transport once from the given configuration.
    pub fn new(config: &MailerConfig) -> Result<Self> {
        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());

        let transport = if config.smtp_secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .context("Failed to create SMTP relay")?
                .port(config.smtp_port)
                .credentials(creds)
                .timeout(Some(SEND_TIMEOUT))
                .build()
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .credentials(creds)
                .timeout(Some(SEND_TIMEOUT))
                .build()
        };

        let from_mailbox: Mailbox = match &config.from_name {
            Some(name) => format!("{} <{}>", name, config.smtp_user),
            None => config.smtp_user.clone(),
        }
        .parse()
        .context("Invalid from email address")?;

        let to_mailbox: Mailbox = config
            .to
            .parse()
            .context("Invalid recipient email address")?;

        Ok(Self {
            transport,
            from_mailbox,
            to_mailbox,
        })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message> {
        let mut builder = Message::builder()
            .from(self.from_mailbox.clone())
            .to(self.to_mailbox.clone())
            .subject(&email.subject);

        if let Some(reply_to) = &email.reply_to {
            let reply_to: Mailbox = reply_to.parse().context("Invalid reply-to address")?;
            builder = builder.reply_to(reply_to);
        }

        let message = match &email.html {
            Some(html) => builder
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
                                .body(html.clone()),
                        ),
                )
                .context("Failed to build email message")?,
            None => builder
                .body(email.text.clone())
                .context("Failed to build email message")?,
        };

        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<String> {
        let message = self.build_message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .context("Failed to send email")?;

        let id = response.message().collect::<Vec<_>>().join(" ");
        if id.is_empty() {
            Ok("ok".to_string())
        } else {
            Ok(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> MailerConfig {
        MailerConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 465,
            smtp_secure: true,
            smtp_user: "studio@example.com".to_string(),
            smtp_pass: "app-password".to_string(),
            from_name: Some("Creative Sparkles".to_string()),
            to: "inbox@example.com".to_string(),
        }
    }

    #[test]
    fn test_env_truthy() {
        assert!(env_truthy("1"));
        assert!(env_truthy("true"));
        assert!(env_truthy("YES"));
        assert!(!env_truthy("0"));
        assert!(!env_truthy("false"));
        assert!(!env_truthy(""));
    }

    #[test]
    fn test_mailer_builds_from_config() {
        assert!(SmtpMailer::new(&test_config()).is_ok());
    }

    #[test]
    fn test_build_message_plain_text() {
        let mailer = SmtpMailer::new(&test_config()).unwrap();
        let email = OutgoingEmail {
            subject: "Test".to_string(),
            text: "Body".to_string(),
            html: None,
            reply_to: None,
        };
        assert!(mailer.build_message(&email).is_ok());
    }

    #[test]
    fn test_build_message_with_html_and_reply_to() {
        let mailer = SmtpMailer::new(&test_config()).unwrap();
        let email = OutgoingEmail {
            subject: "Test".to_string(),
            text: "Body".to_string(),
            html: Some("<p>Body</p>".to_string()),
            reply_to: Some("ada@x.com".to_string()),
        };
        assert!(mailer.build_message(&email).is_ok());
    }

    #[test]
    fn test_build_message_rejects_bad_reply_to() {
        let mailer = SmtpMailer::new(&test_config()).unwrap();
        let email = OutgoingEmail {
            subject: "Test".to_string(),
            text: "Body".to_string(),
            html: None,
            reply_to: Some("not an address".to_string()),
        };
        assert!(mailer.build_message(&email).is_err());
    }
}
