//! Repository for the `projects` table (portfolio case studies).

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::content_table::ContentTable;
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::repositories::SortableRepo;

const COLUMNS: &str = "id, title, slug, client_name, summary, description, cover_image_url, \
    category, completed_on, sort_order, is_active, deleted_at, created_at, updated_at";

/// Provides CRUD operations for portfolio projects.
pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        slug: &str,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => SortableRepo::next_sort_order(&mut tx, ContentTable::Projects).await?,
        };
        let query = format!(
            "INSERT INTO projects \
                (title, slug, client_name, summary, description, cover_image_url, category, \
                 completed_on, sort_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, true)) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.client_name)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.cover_image_url)
            .bind(&input.category)
            .bind(input.completed_on)
            .bind(sort_order)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published project by slug.
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE slug = $1 AND is_active = true AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
        category: Option<&str>,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE deleted_at IS NULL AND ($1 OR is_active = true) \
               AND ($2::TEXT IS NULL OR category = $2) \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(include_inactive)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET \
                title = COALESCE($2, title), \
                slug = COALESCE($3, slug), \
                client_name = COALESCE($4, client_name), \
                summary = COALESCE($5, summary), \
                description = COALESCE($6, description), \
                cover_image_url = COALESCE($7, cover_image_url), \
                category = COALESCE($8, category), \
                completed_on = COALESCE($9, completed_on), \
                is_active = COALESCE($10, is_active) \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.client_name)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.cover_image_url)
            .bind(&input.category)
            .bind(input.completed_on)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
