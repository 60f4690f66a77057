//! Workflow status values for inbound submissions.
//!
//! Stored as lowercase text columns guarded by CHECK constraints; these enums
//! are the typed view used by handlers to validate input.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Triage state of a contact form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    New,
    Read,
    Replied,
    Archived,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::New,
        SubmissionStatus::Read,
        SubmissionStatus::Replied,
        SubmissionStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Read => "read",
            SubmissionStatus::Replied => "replied",
            SubmissionStatus::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| CoreError::Validation(format!("Unknown submission status '{value}'")))
    }
}

/// Newsletter subscription state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Subscribed,
    Unsubscribed,
}

impl SubscriptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionStatus::Subscribed => "subscribed",
            SubscriptionStatus::Unsubscribed => "unsubscribed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "subscribed" => Ok(SubscriptionStatus::Subscribed),
            "unsubscribed" => Ok(SubscriptionStatus::Unsubscribed),
            other => Err(CoreError::Validation(format!(
                "Unknown subscription status '{other}'"
            ))),
        }
    }
}

/// Normalise an email address for storage and comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
