//! Email notification dispatch via SMTP.
//!
//! [`Notifier`] abstracts the two notification kinds the site sends, so
//! workflows and handlers can be exercised with fakes. [`SmtpNotifier`]
//! wraps the `lettre` async SMTP transport and renders the HTML templates
//! in [`templates`]. Configuration is loaded from environment variables; if
//! `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns `None` and the
//! caller should fall back to [`DisabledNotifier`].

mod templates;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email dispatch failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// SMTP is not configured (`SMTP_HOST` unset).
    #[error("Email delivery is not configured")]
    NotConfigured,
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@nest.agency";

/// Configuration for the SMTP notifier.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
    /// Recipients of admin notifications; defaults to the from address.
    pub admin_emails: Vec<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// dispatch is not configured and sends should fail soft.
    ///
    /// | Variable        | Required | Default               |
    /// |-----------------|----------|-----------------------|
    /// | `SMTP_HOST`     | yes      | --                    |
    /// | `SMTP_PORT`     | no       | `587`                 |
    /// | `SMTP_FROM`     | no       | `noreply@nest.agency` |
    /// | `SMTP_USER`     | no       | --                    |
    /// | `SMTP_PASSWORD` | no       | --                    |
    /// | `ADMIN_EMAILS`  | no       | the from address      |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let from_address =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string());

        let admin_emails: Vec<String> = std::env::var("ADMIN_EMAILS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let admin_emails = if admin_emails.is_empty() {
            vec![from_address.clone()]
        } else {
            admin_emails
        };

        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            admin_emails,
        })
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Contact form fields carried in an admin notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactData {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    pub message: String,
    /// Submission timestamp, preformatted for display.
    pub submitted_at: String,
}

/// Dispatches the two notification emails the site sends.
///
/// Both methods return the RFC 5322 Message-ID of the sent mail.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Confirmation to the person who submitted the contact form.
    async fn send_user_confirmation(&self, to: &str, user_name: &str)
        -> Result<String, MailError>;

    /// Alert to the configured admin addresses about a new submission.
    async fn send_admin_notification(&self, contact: &ContactData) -> Result<String, MailError>;
}

/// Notifier used when SMTP is not configured: every send fails with
/// [`MailError::NotConfigured`], which callers on best-effort paths log
/// and swallow.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send_user_confirmation(
        &self,
        _to: &str,
        _user_name: &str,
    ) -> Result<String, MailError> {
        Err(MailError::NotConfigured)
    }

    async fn send_admin_notification(&self, _contact: &ContactData) -> Result<String, MailError> {
        Err(MailError::NotConfigured)
    }
}

// ---------------------------------------------------------------------------
// SmtpNotifier
// ---------------------------------------------------------------------------

/// Production [`Notifier`] sending HTML mail over SMTP.
pub struct SmtpNotifier {
    config: EmailConfig,
}

impl SmtpNotifier {
    /// Create a new SMTP notifier with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(builder.build())
    }

    fn from_mailbox(&self) -> Result<Mailbox, MailError> {
        Ok(format!("NEST <{}>", self.config.from_address).parse()?)
    }

    /// Fresh Message-ID for an outgoing mail, domain taken from the sender.
    fn new_message_id(&self) -> String {
        let domain = self
            .config
            .from_address
            .rsplit_once('@')
            .map(|(_, d)| d)
            .unwrap_or("nest.agency");
        format!("<{}@{domain}>", Uuid::new_v4())
    }

    async fn send(&self, email: Message, message_id: String) -> Result<String, MailError> {
        self.transport()?.send(email).await?;
        Ok(message_id)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_user_confirmation(
        &self,
        to: &str,
        user_name: &str,
    ) -> Result<String, MailError> {
        let message_id = self.new_message_id();
        let email = Message::builder()
            .from(self.from_mailbox()?)
            .to(to.parse()?)
            .message_id(Some(message_id.clone()))
            .subject("We've received your message!")
            .header(ContentType::TEXT_HTML)
            .body(templates::user_confirmation(user_name))
            .map_err(|e| MailError::Build(e.to_string()))?;

        let message_id = self.send(email, message_id).await?;
        tracing::info!(to, %message_id, "User confirmation email sent");
        Ok(message_id)
    }

    async fn send_admin_notification(&self, contact: &ContactData) -> Result<String, MailError> {
        let message_id = self.new_message_id();
        let mut builder = Message::builder()
            .from(self.from_mailbox()?)
            .reply_to(contact.email.parse()?)
            .message_id(Some(message_id.clone()))
            .subject(format!("New contact from {}", contact.name))
            .header(ContentType::TEXT_HTML);

        for admin in &self.config.admin_emails {
            builder = builder.to(admin.parse()?);
        }

        let email = builder
            .body(templates::admin_notification(contact))
            .map_err(|e| MailError::Build(e.to_string()))?;

        let message_id = self.send(email, message_id).await?;
        tracing::info!(from = %contact.email, %message_id, "Admin notification email sent");
        Ok(message_id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
