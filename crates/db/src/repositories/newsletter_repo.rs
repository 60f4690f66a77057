//! Repository for the `newsletter_subscriptions` table.

use sqlx::PgPool;
use vitrine_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use vitrine_core::status::SubscriptionStatus;
use vitrine_core::types::DbId;

use crate::models::newsletter::{
    CreateSubscription, NewsletterSubscription, SubscribeOutcome, SubscriptionQuery,
};

const COLUMNS: &str = "id, email, status, unsubscribe_token, source, subscribed_at, \
    unsubscribed_at, created_at, updated_at";

/// Provides subscribe/unsubscribe and admin listing for the newsletter.
pub struct NewsletterRepo;

impl NewsletterRepo {
    /// Subscribe an address.
    ///
    /// A new address is inserted; a previously unsubscribed one is
    /// reactivated; an active one is left untouched. The insert uses
    /// `ON CONFLICT DO NOTHING`, so concurrent first-time sign-ups of the same
    /// address collapse onto one row instead of failing the unique key.
    pub async fn subscribe(
        pool: &PgPool,
        input: &CreateSubscription,
    ) -> Result<(NewsletterSubscription, SubscribeOutcome), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO newsletter_subscriptions (email, unsubscribe_token, source) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (email) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, NewsletterSubscription>(&insert)
            .bind(&input.email)
            .bind(new_unsubscribe_token())
            .bind(&input.source)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(row) = created {
            tx.commit().await?;
            return Ok((row, SubscribeOutcome::Created));
        }

        let select = format!(
            "SELECT {COLUMNS} FROM newsletter_subscriptions WHERE email = $1 FOR UPDATE"
        );
        let existing = sqlx::query_as::<_, NewsletterSubscription>(&select)
            .bind(&input.email)
            .fetch_one(&mut *tx)
            .await?;

        let result = if existing.status == SubscriptionStatus::Subscribed.as_str() {
            (existing, SubscribeOutcome::AlreadySubscribed)
        } else {
            let update = format!(
                "UPDATE newsletter_subscriptions SET \
                    status = 'subscribed', \
                    subscribed_at = NOW(), \
                    unsubscribed_at = NULL, \
                    source = COALESCE($2, source) \
                 WHERE id = $1 \
                 RETURNING {COLUMNS}"
            );
            let row = sqlx::query_as::<_, NewsletterSubscription>(&update)
                .bind(existing.id)
                .bind(&input.source)
                .fetch_one(&mut *tx)
                .await?;
            (row, SubscribeOutcome::Resubscribed)
        };

        tx.commit().await?;
        Ok(result)
    }

    /// Unsubscribe by token. Idempotent: an already unsubscribed row is
    /// returned unchanged. `None` means the token is unknown.
    pub async fn unsubscribe_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<NewsletterSubscription>, sqlx::Error> {
        let query = format!(
            "UPDATE newsletter_subscriptions SET \
                status = 'unsubscribed', \
                unsubscribed_at = COALESCE(unsubscribed_at, NOW()) \
             WHERE unsubscribe_token = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsletterSubscription>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM newsletter_subscriptions WHERE email = $1");
        sqlx::query_as::<_, NewsletterSubscription>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        params: &SubscriptionQuery,
    ) -> Result<Vec<NewsletterSubscription>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(params.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM newsletter_subscriptions \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY subscribed_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, NewsletterSubscription>(&query)
            .bind(&params.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM newsletter_subscriptions \
             WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(pool)
        .await
    }

    /// Every row with the given status, oldest first, for CSV export.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<NewsletterSubscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM newsletter_subscriptions \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY subscribed_at, id"
        );
        sqlx::query_as::<_, NewsletterSubscription>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Permanently remove a subscriber (e.g. on an erasure request).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM newsletter_subscriptions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn new_unsubscribe_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
