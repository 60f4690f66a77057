//! Gallery item entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `gallery_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryItem {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
    pub alt_text: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a gallery item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGalleryItem {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
    pub alt_text: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a gallery item. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGalleryItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
    pub alt_text: Option<String>,
    pub is_active: Option<bool>,
}
