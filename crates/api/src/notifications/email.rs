//! Contact form notifications via SMTP.
//!
//! [`EmailNotifier`] wraps the `lettre` async SMTP transport. If `SMTP_HOST`
//! is not set, [`EmailConfig::from_env`] returns `None` and no mailer is
//! constructed.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use vitrine_db::models::contact::ContactSubmission;

use super::Notifier;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

const DEFAULT_SMTP_PORT: u16 = 587;

const DEFAULT_FROM_ADDRESS: &str = "noreply@vitrine.local";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    /// Defaults to 587 (STARTTLS).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default                 |
    /// |-----------------|----------|-------------------------|
    /// | `SMTP_HOST`     | yes      | --                      |
    /// | `SMTP_PORT`     | no       | `587`                   |
    /// | `SMTP_FROM`     | no       | `noreply@vitrine.local` |
    /// | `SMTP_USER`     | no       | --                      |
    /// | `SMTP_PASSWORD` | no       | --                      |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())?;
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
// Message formatting
// ---------------------------------------------------------------------------

/// Subject and plain-text body for a contact form notification.
pub fn contact_message(submission: &ContactSubmission) -> (String, String) {
    let subject = match submission.subject.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(s) => format!("[Contact] {s}"),
        None => format!("[Contact] Message from {}", submission.name),
    };

    let mut body = format!(
        "Name: {}\nEmail: {}\n",
        submission.name, submission.email
    );
    if let Some(phone) = &submission.phone {
        body.push_str(&format!("Phone: {phone}\n"));
    }
    if let Some(company) = &submission.company {
        body.push_str(&format!("Company: {company}\n"));
    }
    body.push_str(&format!(
        "Received: {}\n\n{}\n",
        submission.created_at.to_rfc3339(),
        submission.message
    ));

    (subject, body)
}

// ---------------------------------------------------------------------------
// EmailNotifier
// ---------------------------------------------------------------------------

/// Mails each contact submission to a fixed staff inbox.
pub struct EmailNotifier {
    config: EmailConfig,
    to_address: String,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig, to_address: String) -> Self {
        Self { config, to_address }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn contact_received(&self, submission: &ContactSubmission) -> Result<(), EmailError> {
        let (subject, body) = contact_message(submission);

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .reply_to(submission.email.parse()?)
            .to(self.to_address.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
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
            submission_id = submission.id,
            to = %self.to_address,
            "Contact notification sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn submission(subject: Option<&str>) -> ContactSubmission {
        ContactSubmission {
            id: 7,
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: Some("+44 20 7946 0000".into()),
            company: None,
            subject: subject.map(str::to_string),
            message: "We need a new landing page.".into(),
            status: "new".into(),
            ip_address: None,
            user_agent: None,
            deleted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn subject_uses_submitted_subject() {
        let (subject, _) = contact_message(&submission(Some("Quote request")));
        assert_eq!(subject, "[Contact] Quote request");
    }

    #[test]
    fn subject_falls_back_to_sender_name() {
        let (subject, _) = contact_message(&submission(Some("   ")));
        assert_eq!(subject, "[Contact] Message from Ada Lovelace");
    }

    #[test]
    fn body_lists_provided_fields_only() {
        let (_, body) = contact_message(&submission(None));
        assert!(body.contains("Email: ada@example.com"));
        assert!(body.contains("Phone: +44 20 7946 0000"));
        assert!(!body.contains("Company:"));
        assert!(body.ends_with("We need a new landing page.\n"));
    }

    #[tokio::test]
    async fn bad_recipient_fails_before_connecting() {
        let notifier = EmailNotifier::new(
            EmailConfig {
                smtp_host: "localhost".into(),
                smtp_port: DEFAULT_SMTP_PORT,
                from_address: DEFAULT_FROM_ADDRESS.into(),
                smtp_user: None,
                smtp_password: None,
            },
            "not an address".into(),
        );
        let err = notifier.contact_received(&submission(None)).await.unwrap_err();
        assert!(matches!(err, EmailError::Address(_)));
    }
}
