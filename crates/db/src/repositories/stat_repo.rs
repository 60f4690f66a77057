//! Repository for the `stats` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::content_table::ContentTable;
use crate::models::stat::{CreateStat, Stat, UpdateStat};
use crate::repositories::SortableRepo;

const COLUMNS: &str =
    "id, label, value, suffix, icon, sort_order, is_active, deleted_at, created_at, updated_at";

pub struct StatRepo;

impl StatRepo {
    pub async fn create(pool: &PgPool, input: &CreateStat) -> Result<Stat, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => SortableRepo::next_sort_order(&mut tx, ContentTable::Stats).await?,
        };
        let query = format!(
            "INSERT INTO stats (label, value, suffix, icon, sort_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true)) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Stat>(&query)
            .bind(&input.label)
            .bind(&input.value)
            .bind(&input.suffix)
            .bind(&input.icon)
            .bind(sort_order)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Stat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stats WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Stat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Stat>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stats \
             WHERE deleted_at IS NULL AND ($1 OR is_active = true) \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Stat>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStat,
    ) -> Result<Option<Stat>, sqlx::Error> {
        let query = format!(
            "UPDATE stats SET \
                label = COALESCE($2, label), \
                value = COALESCE($3, value), \
                suffix = COALESCE($4, suffix), \
                icon = COALESCE($5, icon), \
                is_active = COALESCE($6, is_active) \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stat>(&query)
            .bind(id)
            .bind(&input.label)
            .bind(&input.value)
            .bind(&input.suffix)
            .bind(&input.icon)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
