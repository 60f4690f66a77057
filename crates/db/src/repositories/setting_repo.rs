//! Repository for the `settings` table.

use sqlx::PgPool;

use crate::models::setting::{Setting, UpsertSetting};

const COLUMNS: &str =
    "id, key, value, group_name, description, is_public, created_at, updated_at";

/// Group assigned to a new setting when none is given.
pub const DEFAULT_GROUP: &str = "general";

/// Provides key/value access to site settings.
pub struct SettingRepo;

impl SettingRepo {
    /// All settings, grouped then by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings ORDER BY group_name, key");
        sqlx::query_as::<_, Setting>(&query).fetch_all(pool).await
    }

    /// Settings flagged `is_public`, safe to expose to the site.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<Setting>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM settings WHERE is_public = true ORDER BY key");
        sqlx::query_as::<_, Setting>(&query).fetch_all(pool).await
    }

    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE key = $1");
        sqlx::query_as::<_, Setting>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the value for `key`. Metadata fields left as `None`
    /// keep their stored value on update.
    pub async fn upsert(
        pool: &PgPool,
        key: &str,
        input: &UpsertSetting,
    ) -> Result<Setting, sqlx::Error> {
        let query = format!(
            "INSERT INTO settings (key, value, group_name, description, is_public) \
             VALUES ($1, $2, COALESCE($3, '{DEFAULT_GROUP}'), $4, COALESCE($5, false)) \
             ON CONFLICT (key) DO UPDATE SET \
                value = EXCLUDED.value, \
                group_name = COALESCE($3, settings.group_name), \
                description = COALESCE($4, settings.description), \
                is_public = COALESCE($5, settings.is_public) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Setting>(&query)
            .bind(key)
            .bind(&input.value)
            .bind(&input.group_name)
            .bind(&input.description)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
