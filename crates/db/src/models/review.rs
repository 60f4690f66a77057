//! Client testimonial (review) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `reviews` table. `rating` is 1-5.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub author_name: String,
    pub author_title: Option<String>,
    pub company: Option<String>,
    pub avatar_url: Option<String>,
    pub rating: i16,
    pub content: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub author_name: String,
    pub author_title: Option<String>,
    pub company: Option<String>,
    pub avatar_url: Option<String>,
    pub rating: Option<i16>,
    pub content: String,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReview {
    pub author_name: Option<String>,
    pub author_title: Option<String>,
    pub company: Option<String>,
    pub avatar_url: Option<String>,
    pub rating: Option<i16>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
}
