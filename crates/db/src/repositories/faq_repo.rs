//! Repository for the `faqs` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::content_table::ContentTable;
use crate::models::faq::{CreateFaq, Faq, UpdateFaq};
use crate::repositories::SortableRepo;

const COLUMNS: &str =
    "id, question, answer, category, sort_order, is_active, deleted_at, created_at, updated_at";

/// Provides CRUD operations for FAQ entries.
pub struct FaqRepo;

impl FaqRepo {
    pub async fn create(pool: &PgPool, input: &CreateFaq) -> Result<Faq, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => SortableRepo::next_sort_order(&mut tx, ContentTable::Faqs).await?,
        };
        let query = format!(
            "INSERT INTO faqs (question, answer, category, sort_order, is_active) \
             VALUES ($1, $2, $3, $4, COALESCE($5, true)) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Faq>(&query)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(&input.category)
            .bind(sort_order)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Faq>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faqs WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Faq>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live FAQs in display order. `category` narrows to one group.
    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
        category: Option<&str>,
    ) -> Result<Vec<Faq>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM faqs \
             WHERE deleted_at IS NULL AND ($1 OR is_active = true) \
               AND ($2::TEXT IS NULL OR category = $2) \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(include_inactive)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFaq,
    ) -> Result<Option<Faq>, sqlx::Error> {
        let query = format!(
            "UPDATE faqs SET \
                question = COALESCE($2, question), \
                answer = COALESCE($3, answer), \
                category = COALESCE($4, category), \
                is_active = COALESCE($5, is_active) \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(id)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(&input.category)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
