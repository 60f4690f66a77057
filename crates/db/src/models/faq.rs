//! FAQ entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `faqs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Faq {
    pub id: DbId,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a FAQ entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaq {
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a FAQ entry. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFaq {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}
