//! Per-page SEO metadata model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `seo_metadata` table. `page_path` always starts with `/`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SeoMetadata {
    pub id: DbId,
    pub page_path: String,
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image_url: Option<String>,
    pub canonical_url: Option<String>,
    pub no_index: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSeoMetadata {
    pub page_path: String,
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image_url: Option<String>,
    pub canonical_url: Option<String>,
    pub no_index: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSeoMetadata {
    pub page_path: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image_url: Option<String>,
    pub canonical_url: Option<String>,
    pub no_index: Option<bool>,
}
