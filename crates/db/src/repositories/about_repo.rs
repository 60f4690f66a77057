//! Repository for the `about_contents` table.
//!
//! `content` is stored as-is; shape validation happens before it gets here.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::content_table::ContentTable;
use crate::models::about::{AboutContent, CreateAboutContent, UpdateAboutContent};
use crate::repositories::SortableRepo;

const COLUMNS: &str = "id, section_type, title, content, sort_order, is_active, deleted_at, \
    created_at, updated_at";

/// Provides CRUD operations for about-page sections.
pub struct AboutContentRepo;

impl AboutContentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAboutContent,
    ) -> Result<AboutContent, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => SortableRepo::next_sort_order(&mut tx, ContentTable::AboutContents).await?,
        };
        let query = format!(
            "INSERT INTO about_contents (section_type, title, content, sort_order, is_active) \
             VALUES ($1, $2, $3, $4, COALESCE($5, true)) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AboutContent>(&query)
            .bind(&input.section_type)
            .bind(&input.title)
            .bind(&input.content)
            .bind(sort_order)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AboutContent>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM about_contents WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, AboutContent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
    ) -> Result<Vec<AboutContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM about_contents \
             WHERE deleted_at IS NULL AND ($1 OR is_active = true) \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, AboutContent>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAboutContent,
    ) -> Result<Option<AboutContent>, sqlx::Error> {
        let query = format!(
            "UPDATE about_contents SET \
                section_type = COALESCE($2, section_type), \
                title = COALESCE($3, title), \
                content = COALESCE($4, content), \
                is_active = COALESCE($5, is_active) \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AboutContent>(&query)
            .bind(id)
            .bind(&input.section_type)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
