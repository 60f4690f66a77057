//! Repository for the `gallery_items` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::content_table::ContentTable;
use crate::models::gallery::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};
use crate::repositories::SortableRepo;

const COLUMNS: &str = "id, title, description, image_url, thumbnail_url, category, alt_text, \
    sort_order, is_active, deleted_at, created_at, updated_at";

/// Provides CRUD operations for gallery items.
pub struct GalleryItemRepo;

impl GalleryItemRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryItem,
    ) -> Result<GalleryItem, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => SortableRepo::next_sort_order(&mut tx, ContentTable::GalleryItems).await?,
        };
        let query = format!(
            "INSERT INTO gallery_items \
                (title, description, image_url, thumbnail_url, category, alt_text, \
                 sort_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, true)) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, GalleryItem>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.thumbnail_url)
            .bind(&input.category)
            .bind(&input.alt_text)
            .bind(sort_order)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM gallery_items WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live gallery items in display order, optionally narrowed to one
    /// category.
    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
        category: Option<&str>,
    ) -> Result<Vec<GalleryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery_items \
             WHERE deleted_at IS NULL AND ($1 OR is_active = true) \
               AND ($2::TEXT IS NULL OR category = $2) \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(include_inactive)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Distinct categories among published items, for the gallery filter bar.
    pub async fn list_categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM gallery_items \
             WHERE category IS NOT NULL AND is_active = true AND deleted_at IS NULL \
             ORDER BY category",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryItem,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_items SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                image_url = COALESCE($4, image_url), \
                thumbnail_url = COALESCE($5, thumbnail_url), \
                category = COALESCE($6, category), \
                alt_text = COALESCE($7, alt_text), \
                is_active = COALESCE($8, is_active) \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.thumbnail_url)
            .bind(&input.category)
            .bind(&input.alt_text)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
