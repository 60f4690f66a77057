//! Outbound notifications for inbound site traffic.
//!
//! Handlers talk to a [`Notifier`] trait object held in
//! [`AppState`](crate::state::AppState), so tests and deployments without
//! SMTP use [`NoopNotifier`].

pub mod email;

use std::sync::Arc;

use async_trait::async_trait;
use vitrine_db::models::contact::ContactSubmission;

pub use email::{EmailConfig, EmailError, EmailNotifier};

/// Receives events that staff should hear about.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A visitor submitted the contact form.
    async fn contact_received(&self, submission: &ContactSubmission) -> Result<(), EmailError>;
}

/// Drops every notification.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn contact_received(&self, submission: &ContactSubmission) -> Result<(), EmailError> {
        tracing::debug!(submission_id = submission.id, "Notifications disabled, skipping");
        Ok(())
    }
}

/// Build the notifier for this process.
///
/// SMTP is used only when both `SMTP_HOST` and a recipient
/// (`CONTACT_NOTIFY_EMAIL`) are configured.
pub fn from_env(notify_email: Option<&str>) -> Arc<dyn Notifier> {
    match (EmailConfig::from_env(), notify_email) {
        (Some(config), Some(to)) => {
            tracing::info!(smtp_host = %config.smtp_host, to, "Contact notifications enabled");
            Arc::new(EmailNotifier::new(config, to.to_string()))
        }
        _ => {
            tracing::info!("Contact notifications disabled (SMTP_HOST or CONTACT_NOTIFY_EMAIL unset)");
            Arc::new(NoopNotifier)
        }
    }
}
