//! Submission notifications over SMTP.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use lumen_core::{Error, Result, escape_html};
use serde::{Deserialize, Serialize};

use crate::submission::Submission;

/// Operator address used when none is configured.
pub const DEFAULT_OPERATOR_EMAIL: &str = "hello@lumen.example";

/// Implicit-TLS SMTP port. Every other port negotiates STARTTLS.
const SMTPS_PORT: u16 = 465;

/// SMTP settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpSettings {
    /// Relay host.
    pub host: Option<String>,
    /// Relay port.
    pub port: u16,
    /// Login user.
    pub user: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// Sender mailbox. Falls back to `user`.
    pub from: Option<String>,
    /// Where operator alerts go. Falls back to [`DEFAULT_OPERATOR_EMAIL`].
    pub operator: Option<String>,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: None,
            port: 587,
            user: None,
            password: None,
            from: None,
            operator: None,
        }
    }
}

impl SmtpSettings {
    /// Operator address, or the built-in fallback.
    pub fn operator_email(&self) -> &str {
        self.operator
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_OPERATOR_EMAIL)
    }
}

/// One outbound HTML message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Recipient address.
    pub to: String,
    /// Optional reply-to address.
    pub reply_to: Option<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Sends [`Email`]s.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message.
    async fn send(&self, email: Email) -> Result<()>;
}

// ============================================================================
// SmtpMailer
// ============================================================================

/// [`Mailer`] that opens a fresh SMTP connection per message.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    settings: SmtpSettings,
}

impl SmtpMailer {
    /// Create a mailer. Settings are checked on each send, not here.
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let host = self
            .settings
            .host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| Error::config("smtp.host is not set"))?;

        let relay = if self.settings.port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        };
        let builder = relay
            .map_err(|e| Error::transport(format!("smtp relay {host}: {e}")))?
            .port(self.settings.port);

        let builder = match (&self.settings.user, &self.settings.password) {
            (Some(user), Some(password)) => {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            }
            _ => builder,
        };

        Ok(builder.build())
    }

    fn from_mailbox(&self) -> Result<Mailbox> {
        let from = self
            .settings
            .from
            .as_deref()
            .or(self.settings.user.as_deref())
            .ok_or_else(|| Error::config("smtp.from is not set"))?;
        parse_mailbox(from)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: Email) -> Result<()> {
        let mut builder = Message::builder()
            .from(self.from_mailbox()?)
            .to(parse_mailbox(&email.to)?)
            .subject(email.subject)
            .header(ContentType::TEXT_HTML);
        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to)?);
        }
        let message = builder
            .body(email.html)
            .map_err(|e| Error::invalid_data(format!("email: {e}")))?;

        self.transport()?
            .send(message)
            .await
            .map_err(|e| Error::transport(format!("smtp send: {e}")))?;
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address
        .parse::<Mailbox>()
        .map_err(|e| Error::invalid_data(format!("address {address:?}: {e}")))
}

// ============================================================================
// Notifier
// ============================================================================

/// Sends the operator alert and the sender acknowledgment.
///
/// Both operations report success as a `bool` and never fail: a transport
/// error is logged and turned into `false`, so one failing send cannot
/// stop the other from being attempted.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    operator: String,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("operator", &self.operator)
            .finish_non_exhaustive()
    }
}

impl Notifier {
    /// Create a notifier sending through `mailer` with alerts to `operator`.
    pub fn new(mailer: Arc<dyn Mailer>, operator: impl Into<String>) -> Self {
        Self {
            mailer,
            operator: operator.into(),
        }
    }

    /// SMTP-backed notifier.
    pub fn smtp(settings: SmtpSettings) -> Self {
        let operator = settings.operator_email().to_string();
        Self::new(Arc::new(SmtpMailer::new(settings)), operator)
    }

    /// The operator address alerts are sent to.
    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// Alert the operator about a new submission.
    pub async fn notify_operator(&self, submission: &Submission) -> bool {
        let email = Email {
            to: self.operator.clone(),
            reply_to: Some(submission.email.clone()),
            subject: format!("New contact form submission from {}", submission.name),
            html: operator_html(submission),
        };

        match self.mailer.send(email).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Operator notification failed: {e}");
                false
            }
        }
    }

    /// Acknowledge receipt to the sender.
    pub async fn notify_applicant(&self, name: &str, email: &str) -> bool {
        let message = Email {
            to: email.to_string(),
            reply_to: None,
            subject: "Thanks for reaching out".to_string(),
            html: applicant_html(name),
        };

        match self.mailer.send(message).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Acknowledgment to sender failed: {e}");
                false
            }
        }
    }
}

/// Every field is escaped here even though `validate` already turned `<`
/// and `>` into entities, so the operator sees `&lt;b&gt;` as typed text.
fn operator_html(submission: &Submission) -> String {
    let message = escape_html(&submission.message).replace('\n', "<br>");
    format!(
        "<h2>New contact form submission</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Message:</strong></p><p>{}</p>",
        escape_html(&submission.name),
        escape_html(&submission.email),
        message,
    )
}

fn applicant_html(name: &str) -> String {
    format!(
        "<p>Hi {},</p>\
         <p>Thanks for getting in touch. We have received your message and will reply soon.</p>",
        escape_html(name),
    )
}
