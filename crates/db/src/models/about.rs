//! About-page section model and DTOs.
//!
//! `content` is JSONB whose shape depends on `section_type`; handlers run it
//! through `vitrine_core::about::validate_section` before it reaches these
//! DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `about_contents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AboutContent {
    pub id: DbId,
    pub section_type: String,
    pub title: Option<String>,
    pub content: serde_json::Value,
    pub sort_order: i32,
    pub is_active: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAboutContent {
    pub section_type: String,
    pub title: Option<String>,
    pub content: serde_json::Value,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Changing `section_type` requires sending `content` valid for the new type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAboutContent {
    pub section_type: Option<String>,
    pub title: Option<String>,
    pub content: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}
