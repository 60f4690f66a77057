//! Repository for the `services` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::content_table::ContentTable;
use crate::models::service::{CreateService, Service, UpdateService};
use crate::repositories::SortableRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, summary, description, icon, image_url, \
    sort_order, is_active, deleted_at, created_at, updated_at";

/// Provides CRUD operations for services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a new service under `slug`. Appended last when no
    /// `sort_order` is given.
    pub async fn create(
        pool: &PgPool,
        input: &CreateService,
        slug: &str,
    ) -> Result<Service, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => SortableRepo::next_sort_order(&mut tx, ContentTable::Services).await?,
        };
        let query = format!(
            "INSERT INTO services \
                (title, slug, summary, description, icon, image_url, sort_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, true)) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Service>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.icon)
            .bind(&input.image_url)
            .bind(sort_order)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Find a live service by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published service by slug.
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services \
             WHERE slug = $1 AND is_active = true AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List live services in display order.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services \
             WHERE deleted_at IS NULL AND ($1 OR is_active = true) \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Update a service. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateService,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET \
                title = COALESCE($2, title), \
                slug = COALESCE($3, slug), \
                summary = COALESCE($4, summary), \
                description = COALESCE($5, description), \
                icon = COALESCE($6, icon), \
                image_url = COALESCE($7, image_url), \
                is_active = COALESCE($8, is_active) \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.icon)
            .bind(&input.image_url)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
