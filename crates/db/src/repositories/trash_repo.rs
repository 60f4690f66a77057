//! Cross-table view of soft-deleted content.

use serde::Serialize;
use sqlx::PgPool;
use vitrine_core::types::{DbId, Timestamp};

use crate::content_table::ContentTable;

/// A single soft-deleted row surfaced in the trash list.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TrashedItem {
    pub id: DbId,
    pub entity_type: String,
    pub label: Option<String>,
    pub deleted_at: Timestamp,
}

/// Provides cross-table trash operations.
pub struct TrashRepo;

impl TrashRepo {
    /// List soft-deleted rows, newest first. `None` lists every content table.
    pub async fn list_trashed(
        pool: &PgPool,
        table: Option<ContentTable>,
    ) -> Result<Vec<TrashedItem>, sqlx::Error> {
        let selects: Vec<String> = match table {
            Some(t) => vec![trashed_select(t)],
            None => ContentTable::ALL.into_iter().map(trashed_select).collect(),
        };
        let sql = format!("{} ORDER BY deleted_at DESC", selects.join(" UNION ALL "));
        sqlx::query_as::<_, TrashedItem>(&sql).fetch_all(pool).await
    }

    /// Permanently delete every trashed row in every content table.
    ///
    /// Runs in one transaction; returns the total number of rows removed.
    pub async fn purge_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut total = 0;
        for t in ContentTable::ALL {
            let sql = format!("DELETE FROM {} WHERE deleted_at IS NOT NULL", t.table());
            total += sqlx::query(&sql).execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;
        Ok(total)
    }
}

fn trashed_select(table: ContentTable) -> String {
    format!(
        "SELECT id, '{name}' AS entity_type, {label}::TEXT AS label, deleted_at \
         FROM {name} WHERE deleted_at IS NOT NULL",
        name = table.table(),
        label = table.label_expr(),
    )
}
