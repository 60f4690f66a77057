//! Integration tests for manual ordering, publish toggling, soft delete,
//! restore and trash purging across content tables.

use assert_matches::assert_matches;
use sqlx::PgPool;
use vitrine_core::error::CoreError;
use vitrine_core::ordering::{move_item, validate_permutation};
use vitrine_db::models::faq::CreateFaq;
use vitrine_db::models::service::CreateService;
use vitrine_db::repositories::{FaqRepo, ServiceRepo, SortableRepo, TrashRepo};
use vitrine_db::ContentTable;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_service(title: &str) -> CreateService {
    CreateService {
        title: title.to_string(),
        slug: None,
        summary: None,
        description: None,
        icon: None,
        image_url: None,
        sort_order: None,
        is_active: None,
    }
}

fn new_faq(question: &str, category: Option<&str>) -> CreateFaq {
    CreateFaq {
        question: question.to_string(),
        answer: "Yes.".to_string(),
        category: category.map(str::to_string),
        sort_order: None,
        is_active: None,
    }
}

async fn seed_services(pool: &PgPool, titles: &[&str]) -> Vec<i64> {
    let mut ids = Vec::new();
    for title in titles {
        let slug = vitrine_core::slug::slugify(title);
        let svc = ServiceRepo::create(pool, &new_service(title), &slug)
            .await
            .unwrap();
        ids.push(svc.id);
    }
    ids
}

/// Error type for ordering plans run through `SortableRepo::reorder`.
#[allow(dead_code)]
#[derive(Debug)]
enum OrderingFailure {
    Core(CoreError),
    Database(sqlx::Error),
}

impl From<CoreError> for OrderingFailure {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<sqlx::Error> for OrderingFailure {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

async fn sort_orders(pool: &PgPool) -> Vec<(i64, i32)> {
    sqlx::query_as("SELECT id, sort_order FROM services WHERE deleted_at IS NULL ORDER BY sort_order, id")
        .fetch_all(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_rows_are_appended(pool: PgPool) {
    let ids = seed_services(&pool, &["Design", "Build", "Launch"]).await;
    assert_eq!(
        sort_orders(&pool).await,
        vec![(ids[0], 0), (ids[1], 1), (ids[2], 2)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_renumbers_densely(pool: PgPool) {
    let ids = seed_services(&pool, &["A", "B", "C"]).await;
    let requested = vec![ids[2], ids[0], ids[1]];

    let assignments = SortableRepo::reorder(&pool, ContentTable::Services, |live| {
        validate_permutation(live, &requested)?;
        Ok::<_, OrderingFailure>(requested.clone())
    })
    .await
    .unwrap();

    assert_eq!(assignments.len(), 3);
    assert_eq!(
        sort_orders(&pool).await,
        vec![(ids[2], 0), (ids[0], 1), (ids[1], 2)]
    );
    let listed: Vec<i64> = ServiceRepo::list(&pool, true)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(listed, requested);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_reorder_keeps_stored_order(pool: PgPool) {
    let ids = seed_services(&pool, &["A", "B", "C"]).await;
    let partial = vec![ids[1], ids[0]];

    let result = SortableRepo::reorder(&pool, ContentTable::Services, |live| {
        validate_permutation(live, &partial)?;
        Ok::<_, OrderingFailure>(partial.clone())
    })
    .await;

    assert_matches!(result, Err(OrderingFailure::Core(CoreError::Validation(_))));
    assert_eq!(
        sort_orders(&pool).await,
        vec![(ids[0], 0), (ids[1], 1), (ids[2], 2)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn move_item_then_apply(pool: PgPool) {
    let ids = seed_services(&pool, &["A", "B", "C", "D"]).await;

    SortableRepo::reorder(&pool, ContentTable::Services, |live| {
        Ok::<_, OrderingFailure>(move_item(live, ids[3], 0)?)
    })
    .await
    .unwrap();

    assert_eq!(
        SortableRepo::live_ids(&pool, ContentTable::Services).await.unwrap(),
        vec![ids[3], ids[0], ids[1], ids[2]]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_creates_and_moves_keep_positions_distinct(pool: PgPool) {
    let mut handles = Vec::new();
    for i in 0..10 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                FaqRepo::create(&pool, &new_faq(&format!("Question {i}?"), None)).await?;
            } else {
                // Rotate the current head to the end.
                SortableRepo::reorder::<_, OrderingFailure>(&pool, ContentTable::Faqs, |live| {
                    match live.first() {
                        Some(&head) => Ok(move_item(live, head, live.len())?),
                        None => Ok(Vec::new()),
                    }
                })
                .await?;
            }
            Ok::<_, OrderingFailure>(())
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let orders: Vec<i32> = sqlx::query_scalar(
        "SELECT sort_order FROM faqs WHERE deleted_at IS NULL ORDER BY sort_order",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(orders, (0..5).collect::<Vec<i32>>());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn live_ids_include_unpublished_rows(pool: PgPool) {
    let ids = seed_services(&pool, &["A", "B"]).await;
    SortableRepo::toggle_active(&pool, ContentTable::Services, ids[0])
        .await
        .unwrap();

    let live = SortableRepo::live_ids(&pool, ContentTable::Services).await.unwrap();
    assert_eq!(live, ids);

    let public = ServiceRepo::list(&pool, false).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, ids[1]);
}

// ---------------------------------------------------------------------------
// Publish toggle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_flips_and_reports(pool: PgPool) {
    let faq = FaqRepo::create(&pool, &new_faq("Do you ship?", None)).await.unwrap();
    assert!(faq.is_active);

    let first = SortableRepo::toggle_active(&pool, ContentTable::Faqs, faq.id).await.unwrap();
    let second = SortableRepo::toggle_active(&pool, ContentTable::Faqs, faq.id).await.unwrap();
    assert_eq!(first, Some(false));
    assert_eq!(second, Some(true));

    let missing = SortableRepo::toggle_active(&pool, ContentTable::Faqs, 999_999).await.unwrap();
    assert_eq!(missing, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn faq_category_filter(pool: PgPool) {
    FaqRepo::create(&pool, &new_faq("Billing?", Some("billing"))).await.unwrap();
    FaqRepo::create(&pool, &new_faq("Support?", Some("support"))).await.unwrap();

    let billing = FaqRepo::list(&pool, false, Some("billing")).await.unwrap();
    assert_eq!(billing.len(), 1);
    assert_eq!(billing[0].question, "Billing?");
    assert_eq!(FaqRepo::list(&pool, false, None).await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Soft delete, restore, trash
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn soft_deleted_rows_are_hidden(pool: PgPool) {
    let ids = seed_services(&pool, &["Keep", "Drop"]).await;

    assert!(SortableRepo::soft_delete(&pool, ContentTable::Services, ids[1]).await.unwrap());
    assert!(!SortableRepo::soft_delete(&pool, ContentTable::Services, ids[1]).await.unwrap());

    assert!(ServiceRepo::find_by_id(&pool, ids[1]).await.unwrap().is_none());
    assert_eq!(ServiceRepo::list(&pool, true).await.unwrap().len(), 1);
    assert_eq!(
        SortableRepo::live_ids(&pool, ContentTable::Services).await.unwrap(),
        vec![ids[0]]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn soft_deleted_slug_can_be_reused(pool: PgPool) {
    let ids = seed_services(&pool, &["Audit"]).await;
    SortableRepo::soft_delete(&pool, ContentTable::Services, ids[0]).await.unwrap();

    let again = ServiceRepo::create(&pool, &new_service("Audit"), "audit").await;
    assert!(again.is_ok());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn restore_appends_to_end(pool: PgPool) {
    let ids = seed_services(&pool, &["A", "B", "C"]).await;
    SortableRepo::soft_delete(&pool, ContentTable::Services, ids[0]).await.unwrap();

    assert!(SortableRepo::restore(&pool, ContentTable::Services, ids[0]).await.unwrap());
    assert!(!SortableRepo::restore(&pool, ContentTable::Services, ids[0]).await.unwrap());

    assert_eq!(
        SortableRepo::live_ids(&pool, ContentTable::Services).await.unwrap(),
        vec![ids[1], ids[2], ids[0]]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn trash_lists_and_purges(pool: PgPool) {
    let ids = seed_services(&pool, &["Old service"]).await;
    let faq = FaqRepo::create(&pool, &new_faq("Old question", None)).await.unwrap();
    SortableRepo::soft_delete(&pool, ContentTable::Services, ids[0]).await.unwrap();
    SortableRepo::soft_delete(&pool, ContentTable::Faqs, faq.id).await.unwrap();

    let all = TrashRepo::list_trashed(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2);
    let faqs_only = TrashRepo::list_trashed(&pool, Some(ContentTable::Faqs)).await.unwrap();
    assert_eq!(faqs_only.len(), 1);
    assert_eq!(faqs_only[0].entity_type, "faqs");
    assert_eq!(faqs_only[0].label.as_deref(), Some("Old question"));

    // Hard delete only applies to trashed rows.
    let live = seed_services(&pool, &["Live"]).await;
    assert!(!SortableRepo::hard_delete(&pool, ContentTable::Services, live[0]).await.unwrap());

    assert_eq!(TrashRepo::purge_all(&pool).await.unwrap(), 2);
    assert!(TrashRepo::list_trashed(&pool, None).await.unwrap().is_empty());
}
