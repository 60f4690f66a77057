//! Repository for the `project_images` table.
//!
//! Images are ordered within their project; ordering is scoped by
//! `project_id` rather than table-wide like [`crate::ContentTable`] rows.

use sqlx::PgPool;
use vitrine_core::ordering::{next_position, renumber, SortAssignment};
use vitrine_core::types::DbId;

use crate::models::project::{CreateProjectImage, ProjectImage, UpdateProjectImage};

const COLUMNS: &str = "id, project_id, image_url, caption, sort_order, created_at, updated_at";

/// Provides CRUD and ordering for project images.
pub struct ProjectImageRepo;

impl ProjectImageRepo {
    /// Attach an image to a project, appended last unless `sort_order` is set.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateProjectImage,
    ) -> Result<ProjectImage, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => {
                Self::lock_project(&mut tx, project_id).await?;
                let max: Option<i32> = sqlx::query_scalar(
                    "SELECT MAX(sort_order) FROM project_images WHERE project_id = $1",
                )
                .bind(project_id)
                .fetch_one(&mut *tx)
                .await?;
                next_position(max)
            }
        };
        let query = format!(
            "INSERT INTO project_images (project_id, image_url, caption, sort_order) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .bind(&input.image_url)
            .bind(&input.caption)
            .bind(sort_order)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Images of a project in display order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_images WHERE project_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Rewrite the image order of one project.
    ///
    /// `plan` gets the current image ids under a lock on the parent project
    /// row and returns the new order; an `Err` from it rolls back unchanged.
    pub async fn reorder<F, E>(
        pool: &PgPool,
        project_id: DbId,
        plan: F,
    ) -> Result<Vec<SortAssignment>, E>
    where
        F: FnOnce(&[DbId]) -> Result<Vec<DbId>, E>,
        E: From<sqlx::Error>,
    {
        let mut tx = pool.begin().await?;
        Self::lock_project(&mut tx, project_id).await?;

        let existing: Vec<DbId> = sqlx::query_scalar(
            "SELECT id FROM project_images WHERE project_id = $1 ORDER BY sort_order, id",
        )
        .bind(project_id)
        .fetch_all(&mut *tx)
        .await?;

        let assignments = renumber(&plan(&existing)?);
        let ids: Vec<DbId> = assignments.iter().map(|a| a.id).collect();
        let orders: Vec<i32> = assignments.iter().map(|a| a.sort_order).collect();

        sqlx::query(
            "UPDATE project_images AS pi SET sort_order = v.sort_order \
             FROM UNNEST($2::BIGINT[], $3::INTEGER[]) AS v(id, sort_order) \
             WHERE pi.id = v.id AND pi.project_id = $1",
        )
        .bind(project_id)
        .bind(&ids)
        .bind(&orders)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(assignments)
    }

    /// Update an image that belongs to `project_id`.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateProjectImage,
    ) -> Result<Option<ProjectImage>, sqlx::Error> {
        let query = format!(
            "UPDATE project_images SET \
                image_url = COALESCE($3, image_url), \
                caption = COALESCE($4, caption) \
             WHERE id = $1 AND project_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.image_url)
            .bind(&input.caption)
            .fetch_optional(pool)
            .await
    }

    /// Delete an image. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_images WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Serialize image ordering per project by locking the project row.
    async fn lock_project(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        project_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
            .bind(project_id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(())
    }
}
