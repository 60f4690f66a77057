//! Repository for the `reviews` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::content_table::ContentTable;
use crate::models::review::{CreateReview, Review, UpdateReview};
use crate::repositories::SortableRepo;

const COLUMNS: &str = "id, author_name, author_title, company, avatar_url, rating, content, \
    sort_order, is_active, deleted_at, created_at, updated_at";

/// Rating stored when the caller does not supply one.
pub const DEFAULT_RATING: i16 = 5;

/// Provides CRUD operations for client reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => SortableRepo::next_sort_order(&mut tx, ContentTable::Reviews).await?,
        };
        let query = format!(
            "INSERT INTO reviews \
                (author_name, author_title, company, avatar_url, rating, content, \
                 sort_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, true)) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Review>(&query)
            .bind(&input.author_name)
            .bind(&input.author_title)
            .bind(&input.company)
            .bind(&input.avatar_url)
            .bind(input.rating.unwrap_or(DEFAULT_RATING))
            .bind(&input.content)
            .bind(sort_order)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews \
             WHERE deleted_at IS NULL AND ($1 OR is_active = true) \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET \
                author_name = COALESCE($2, author_name), \
                author_title = COALESCE($3, author_title), \
                company = COALESCE($4, company), \
                avatar_url = COALESCE($5, avatar_url), \
                rating = COALESCE($6, rating), \
                content = COALESCE($7, content), \
                is_active = COALESCE($8, is_active) \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(&input.author_name)
            .bind(&input.author_title)
            .bind(&input.company)
            .bind(&input.avatar_url)
            .bind(input.rating)
            .bind(&input.content)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
