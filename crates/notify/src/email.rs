//! Threshold notification delivery via SMTP.
//!
//! [`SmtpNotifier`] wraps the `lettre` async SMTP transport to send
//! plain-text threshold emails. Configuration is loaded from environment
//! variables; if `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns
//! `None` and no notifier should be constructed.

use async_trait::async_trait;
use fixtrack_core::issue::IssueType;

use crate::seams::{Notifier, SeamError, ThresholdMessage};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// A recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@fixtrack.local";

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
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured.
    ///
    /// | Variable        | Required | Default                  |
    /// |-----------------|----------|--------------------------|
    /// | `SMTP_HOST`     | yes      | —                        |
    /// | `SMTP_PORT`     | no       | `587`                    |
    /// | `SMTP_FROM`     | no       | `noreply@fixtrack.local` |
    /// | `SMTP_USER`     | no       | —                        |
    /// | `SMTP_PASSWORD` | no       | —                        |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// SmtpNotifier
// ---------------------------------------------------------------------------

/// Sends threshold notification emails via SMTP.
pub struct SmtpNotifier {
    config: EmailConfig,
}

impl SmtpNotifier {
    /// Create a new notifier with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Subject line for the given issue tier.
    fn subject(issue: IssueType, message: &ThresholdMessage) -> String {
        match issue {
            IssueType::Warning => format!(
                "[Fixtrack] Contact warning: {} ({})",
                message.fixture, message.project_name
            ),
            IssueType::Limit => format!(
                "[Fixtrack] Contact limit reached: {} ({})",
                message.fixture, message.project_name
            ),
        }
    }

    /// Plain-text body for the given issue tier.
    fn body(issue: IssueType, message: &ThresholdMessage) -> String {
        let greeting = match &message.owner_name {
            Some(name) => format!("Hello {name},"),
            None => "Hello,".to_string(),
        };

        let headline = match issue {
            IssueType::Warning => format!(
                "Fixture {} has reached its warning threshold: {} of {} contacts.",
                message.fixture, message.contacts, message.threshold
            ),
            IssueType::Limit => format!(
                "Fixture {} has reached its contact limit: {} of {} contacts.",
                message.fixture, message.contacts, message.threshold
            ),
        };

        let mut body = format!(
            "{greeting}\n\n{headline}\nProject: {}\n",
            message.project_name
        );

        if !message.probes.is_empty() {
            body.push_str("\nTest probes on this fixture:\n");
            for probe in &message.probes {
                body.push_str(&format!("  {} x{}\n", probe.part_number, probe.qty));
            }
        }

        body.push_str(&format!("\nTriggered by: {}\n", message.triggered_by));
        body
    }

    /// Build and send the email over a fresh STARTTLS connection.
    async fn deliver(
        &self,
        issue: IssueType,
        message: &ThresholdMessage,
    ) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let mut builder = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(message.to.parse()?)
            .subject(Self::subject(issue, message))
            .header(ContentType::TEXT_PLAIN);

        for cc in &message.cc {
            builder = builder.cc(cc.parse()?);
        }

        let email = builder
            .body(Self::body(issue, message))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(
            to = %message.to,
            cc_count = message.cc.len(),
            issue = %issue,
            fixture = %message.fixture,
            "Threshold notification email sent"
        );
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, issue: IssueType, message: &ThresholdMessage) -> Result<(), SeamError> {
        self.deliver(issue, message).await.map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
