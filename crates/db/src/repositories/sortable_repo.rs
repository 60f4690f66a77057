//! Ordering, publishing and soft-delete operations shared by every
//! [`ContentTable`].
//!
//! Entity repos own their column lists and typed queries; the operations
//! here only touch `id`, `sort_order`, `is_active` and `deleted_at`, which
//! every content table has.
//!
//! Anything that reads the current order and writes a position based on it
//! (create, reorder, move, restore) runs inside a transaction holding the
//! table's ordering lock, so concurrent writers see each other's results.

use sqlx::{PgPool, Postgres, Transaction};
use vitrine_core::ordering::{next_position, renumber, SortAssignment};
use vitrine_core::types::DbId;

use crate::content_table::ContentTable;

/// Provides table-generic operations for sortable content.
pub struct SortableRepo;

impl SortableRepo {
    /// Ids of all live (non-deleted) rows in display order.
    pub async fn live_ids(pool: &PgPool, table: ContentTable) -> Result<Vec<DbId>, sqlx::Error> {
        let query = format!(
            "SELECT id FROM {} WHERE deleted_at IS NULL ORDER BY sort_order, id",
            table.table()
        );
        sqlx::query_scalar::<_, DbId>(&query).fetch_all(pool).await
    }

    /// Take the ordering lock for `table` until `tx` ends.
    pub async fn lock_ordering(
        tx: &mut Transaction<'_, Postgres>,
        table: ContentTable,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(format!("vitrine.sort_order.{}", table.table()))
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// The `sort_order` a newly created row should get to land last.
    ///
    /// Takes the ordering lock, so the caller's INSERT must run in the same
    /// transaction.
    pub async fn next_sort_order(
        tx: &mut Transaction<'_, Postgres>,
        table: ContentTable,
    ) -> Result<i32, sqlx::Error> {
        Self::lock_ordering(tx, table).await?;
        let query = format!(
            "SELECT MAX(sort_order) FROM {} WHERE deleted_at IS NULL",
            table.table()
        );
        let max: Option<i32> = sqlx::query_scalar(&query).fetch_one(&mut **tx).await?;
        Ok(next_position(max))
    }

    /// Rewrite the order of the whole table.
    ///
    /// `plan` receives the live ids in their current order and returns the
    /// new order; it runs under the ordering lock, so the ids it validates
    /// against are the ids that get renumbered. An `Err` from `plan` rolls
    /// back and is returned as-is.
    pub async fn reorder<F, E>(
        pool: &PgPool,
        table: ContentTable,
        plan: F,
    ) -> Result<Vec<SortAssignment>, E>
    where
        F: FnOnce(&[DbId]) -> Result<Vec<DbId>, E>,
        E: From<sqlx::Error>,
    {
        let mut tx = pool.begin().await?;
        Self::lock_ordering(&mut tx, table).await?;

        let select = format!(
            "SELECT id FROM {} WHERE deleted_at IS NULL ORDER BY sort_order, id FOR UPDATE",
            table.table()
        );
        let live: Vec<DbId> = sqlx::query_scalar(&select).fetch_all(&mut *tx).await?;

        let assignments = renumber(&plan(&live)?);
        let rows = Self::apply_order(&mut tx, table, &assignments).await?;
        tx.commit().await?;

        tracing::debug!(table = table.table(), rows, "Applied sort order");
        Ok(assignments)
    }

    /// Write new sort orders in one statement. Returns the number of rows
    /// updated.
    async fn apply_order(
        tx: &mut Transaction<'_, Postgres>,
        table: ContentTable,
        assignments: &[SortAssignment],
    ) -> Result<u64, sqlx::Error> {
        if assignments.is_empty() {
            return Ok(0);
        }

        let ids: Vec<DbId> = assignments.iter().map(|a| a.id).collect();
        let orders: Vec<i32> = assignments.iter().map(|a| a.sort_order).collect();

        let query = format!(
            "UPDATE {t} AS c SET sort_order = v.sort_order \
             FROM UNNEST($1::BIGINT[], $2::INTEGER[]) AS v(id, sort_order) \
             WHERE c.id = v.id AND c.deleted_at IS NULL",
            t = table.table()
        );
        let result = sqlx::query(&query)
            .bind(&ids)
            .bind(&orders)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Flip `is_active` (publish / unpublish).
    ///
    /// Returns the new value, or `None` if no live row has this id.
    pub async fn toggle_active(
        pool: &PgPool,
        table: ContentTable,
        id: DbId,
    ) -> Result<Option<bool>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET is_active = NOT is_active \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING is_active",
            table.table()
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a row. Returns `false` if it was already deleted or missing.
    pub async fn soft_delete(
        pool: &PgPool,
        table: ContentTable,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
            table.table()
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted row, placing it after the current last row.
    ///
    /// Returns `false` if the row is not in the trash.
    pub async fn restore(pool: &PgPool, table: ContentTable, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE {t} SET deleted_at = NULL, \
                sort_order = (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM {t} WHERE deleted_at IS NULL) \
             WHERE id = $1 AND deleted_at IS NOT NULL",
            t = table.table()
        );
        let mut tx = pool.begin().await?;
        Self::lock_ordering(&mut tx, table).await?;
        let result = sqlx::query(&query).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a row that is already in the trash.
    pub async fn hard_delete(
        pool: &PgPool,
        table: ContentTable,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "DELETE FROM {} WHERE id = $1 AND deleted_at IS NOT NULL",
            table.table()
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
