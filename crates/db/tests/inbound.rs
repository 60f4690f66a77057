//! Contact submissions and newsletter subscriptions.

use assert_matches::assert_matches;
use sqlx::PgPool;
use vitrine_db::models::contact::{ContactQuery, CreateContactSubmission};
use vitrine_db::models::newsletter::{CreateSubscription, SubscribeOutcome, SubscriptionQuery};
use vitrine_db::repositories::{ContactSubmissionRepo, NewsletterRepo};

fn submission(name: &str, message: &str) -> CreateContactSubmission {
    CreateContactSubmission {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: None,
        company: None,
        subject: Some("Project enquiry".to_string()),
        message: message.to_string(),
        ip_address: Some("203.0.113.7".to_string()),
        user_agent: None,
    }
}

fn signup(email: &str) -> CreateSubscription {
    CreateSubscription {
        email: email.to_string(),
        source: Some("footer".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_defaults_to_new(pool: PgPool) {
    let sub = ContactSubmissionRepo::create(&pool, &submission("Ada", "Hello"))
        .await
        .unwrap();
    assert_eq!(sub.status, "new");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_filters_and_counts(pool: PgPool) {
    let a = ContactSubmissionRepo::create(&pool, &submission("Ada", "Need a website"))
        .await
        .unwrap();
    ContactSubmissionRepo::create(&pool, &submission("Grace", "Logo refresh"))
        .await
        .unwrap();
    ContactSubmissionRepo::set_status(&pool, a.id, "replied")
        .await
        .unwrap()
        .unwrap();

    let replied = ContactQuery {
        status: Some("replied".to_string()),
        ..Default::default()
    };
    let rows = ContactSubmissionRepo::list(&pool, &replied).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, a.id);
    assert_eq!(ContactSubmissionRepo::count(&pool, &replied).await.unwrap(), 1);

    let search = ContactQuery {
        search: Some("logo".to_string()),
        ..Default::default()
    };
    let rows = ContactSubmissionRepo::list(&pool, &search).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Grace");

    let counts = ContactSubmissionRepo::status_counts(&pool).await.unwrap();
    assert_eq!(counts.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_rejects_unknown_status(pool: PgPool) {
    let sub = ContactSubmissionRepo::create(&pool, &submission("Ada", "Hi"))
        .await
        .unwrap();
    let result = ContactSubmissionRepo::set_status(&pool, sub.id, "spam").await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_soft_delete_hides_row(pool: PgPool) {
    let sub = ContactSubmissionRepo::create(&pool, &submission("Ada", "Hi"))
        .await
        .unwrap();
    assert!(ContactSubmissionRepo::soft_delete(&pool, sub.id).await.unwrap());
    assert!(ContactSubmissionRepo::find_by_id(&pool, sub.id).await.unwrap().is_none());
    assert_eq!(
        ContactSubmissionRepo::count(&pool, &ContactQuery::default()).await.unwrap(),
        0
    );
}

// ---------------------------------------------------------------------------
// Newsletter
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn subscribe_lifecycle(pool: PgPool) {
    let (row, outcome) = NewsletterRepo::subscribe(&pool, &signup("ada@example.com"))
        .await
        .unwrap();
    assert_eq!(outcome, SubscribeOutcome::Created);
    assert_eq!(row.status, "subscribed");
    assert_eq!(row.unsubscribe_token.len(), 32);

    let (_, outcome) = NewsletterRepo::subscribe(&pool, &signup("ada@example.com"))
        .await
        .unwrap();
    assert_eq!(outcome, SubscribeOutcome::AlreadySubscribed);

    let gone = NewsletterRepo::unsubscribe_by_token(&pool, &row.unsubscribe_token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(gone.status, "unsubscribed");
    assert!(gone.unsubscribed_at.is_some());

    let (back, outcome) = NewsletterRepo::subscribe(&pool, &signup("ada@example.com"))
        .await
        .unwrap();
    assert_eq!(outcome, SubscribeOutcome::Resubscribed);
    assert_eq!(back.id, row.id);
    assert!(back.unsubscribed_at.is_none());
    assert_eq!(back.unsubscribe_token, row.unsubscribe_token);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_first_signups_share_one_row(pool: PgPool) {
    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            NewsletterRepo::subscribe(&pool, &signup("race@example.com")).await
        }));
    }

    let mut created = 0;
    let mut ids = Vec::new();
    for handle in handles {
        let (row, outcome) = handle.await.unwrap().unwrap();
        if outcome == SubscribeOutcome::Created {
            created += 1;
        } else {
            assert_eq!(outcome, SubscribeOutcome::AlreadySubscribed);
        }
        ids.push(row.id);
    }

    assert_eq!(created, 1);
    ids.dedup();
    assert_eq!(ids.len(), 1);
    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM newsletter_subscriptions WHERE email = 'race@example.com'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(total, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unsubscribe_unknown_token(pool: PgPool) {
    let result = NewsletterRepo::unsubscribe_by_token(&pool, "nope").await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn subscriber_listing_filters_by_status(pool: PgPool) {
    let (a, _) = NewsletterRepo::subscribe(&pool, &signup("a@example.com")).await.unwrap();
    NewsletterRepo::subscribe(&pool, &signup("b@example.com")).await.unwrap();
    NewsletterRepo::unsubscribe_by_token(&pool, &a.unsubscribe_token)
        .await
        .unwrap();

    let active = SubscriptionQuery {
        status: Some("subscribed".to_string()),
        ..Default::default()
    };
    let rows = NewsletterRepo::list(&pool, &active).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].email, "b@example.com");
    assert_eq!(NewsletterRepo::count(&pool, None).await.unwrap(), 2);
    assert_eq!(NewsletterRepo::list_all(&pool, Some("unsubscribed")).await.unwrap().len(), 1);
}
