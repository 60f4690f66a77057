//! Repository for the `seo_metadata` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::seo::{CreateSeoMetadata, SeoMetadata, UpdateSeoMetadata};

const COLUMNS: &str = "id, page_path, title, description, keywords, og_title, og_description, \
    og_image_url, canonical_url, no_index, created_at, updated_at";

/// Provides CRUD operations for per-page SEO metadata.
pub struct SeoRepo;

impl SeoRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSeoMetadata,
    ) -> Result<SeoMetadata, sqlx::Error> {
        let query = format!(
            "INSERT INTO seo_metadata \
                (page_path, title, description, keywords, og_title, og_description, \
                 og_image_url, canonical_url, no_index) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeoMetadata>(&query)
            .bind(&input.page_path)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.keywords)
            .bind(&input.og_title)
            .bind(&input.og_description)
            .bind(&input.og_image_url)
            .bind(&input.canonical_url)
            .bind(input.no_index)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SeoMetadata>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seo_metadata WHERE id = $1");
        sqlx::query_as::<_, SeoMetadata>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact match on the page path (e.g. `/services`).
    pub async fn find_by_path(
        pool: &PgPool,
        page_path: &str,
    ) -> Result<Option<SeoMetadata>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seo_metadata WHERE page_path = $1");
        sqlx::query_as::<_, SeoMetadata>(&query)
            .bind(page_path)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<SeoMetadata>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seo_metadata ORDER BY page_path");
        sqlx::query_as::<_, SeoMetadata>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSeoMetadata,
    ) -> Result<Option<SeoMetadata>, sqlx::Error> {
        let query = format!(
            "UPDATE seo_metadata SET \
                page_path = COALESCE($2, page_path), \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                keywords = COALESCE($5, keywords), \
                og_title = COALESCE($6, og_title), \
                og_description = COALESCE($7, og_description), \
                og_image_url = COALESCE($8, og_image_url), \
                canonical_url = COALESCE($9, canonical_url), \
                no_index = COALESCE($10, no_index) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeoMetadata>(&query)
            .bind(id)
            .bind(&input.page_path)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.keywords)
            .bind(&input.og_title)
            .bind(&input.og_description)
            .bind(&input.og_image_url)
            .bind(&input.canonical_url)
            .bind(input.no_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM seo_metadata WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
