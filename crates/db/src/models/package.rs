//! Pricing package entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `packages` table.
///
/// `features` is stored as a JSONB array of bullet-point strings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Package {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub billing_period: Option<String>,
    pub features: Json<Vec<String>>,
    pub is_featured: bool,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a package.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePackage {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: Option<String>,
    pub billing_period: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub is_featured: Option<bool>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a package. `features`, when present, replaces the list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePackage {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub currency: Option<String>,
    pub billing_period: Option<String>,
    pub features: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub is_active: Option<bool>,
}
