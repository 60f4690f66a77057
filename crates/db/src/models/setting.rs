//! Site setting (key/value) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `settings` table. `value` is arbitrary JSON.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Setting {
    pub id: DbId,
    pub key: String,
    pub value: serde_json::Value,
    pub group_name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `PUT /admin/settings/{key}`: creates or replaces the value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSetting {
    pub value: serde_json::Value,
    pub group_name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}
