//! Newsletter subscription model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `newsletter_subscriptions` table.
///
/// `unsubscribe_token` is only ever handed to the subscriber (in the email
/// footer) and is skipped when serializing to admin responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsletterSubscription {
    pub id: DbId,
    pub email: String,
    pub status: String,
    #[serde(skip_serializing)]
    pub unsubscribe_token: String,
    pub source: Option<String>,
    pub subscribed_at: Timestamp,
    pub unsubscribed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a sign-up. `email` must already be normalised.
#[derive(Debug, Clone)]
pub struct CreateSubscription {
    pub email: String,
    pub source: Option<String>,
}

/// Filter for the admin subscriber listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// What a subscribe call did, so the handler can pick the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscribeOutcome {
    Created,
    Resubscribed,
    AlreadySubscribed,
}
