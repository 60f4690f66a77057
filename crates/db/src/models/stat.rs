use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A headline figure (e.g. "120+ projects delivered") from the `stats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Stat {
    pub id: DbId,
    pub label: String,
    pub value: String,
    pub suffix: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStat {
    pub label: String,
    pub value: String,
    pub suffix: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStat {
    pub label: Option<String>,
    pub value: Option<String>,
    pub suffix: Option<String>,
    pub icon: Option<String>,
    pub is_active: Option<bool>,
}
