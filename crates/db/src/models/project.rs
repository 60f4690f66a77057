//! Portfolio project and project image models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub client_name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub category: Option<String>,
    pub completed_on: Option<NaiveDate>,
    pub sort_order: i32,
    pub is_active: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub slug: Option<String>,
    pub client_name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub category: Option<String>,
    pub completed_on: Option<NaiveDate>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a project. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub client_name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub category: Option<String>,
    pub completed_on: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// A row from the `project_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectImage {
    pub id: DbId,
    pub project_id: DbId,
    pub image_url: String,
    pub caption: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for attaching an image to a project. Appended last when `sort_order`
/// is omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectImage {
    pub image_url: String,
    pub caption: Option<String>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a project image.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectImage {
    pub image_url: Option<String>,
    pub caption: Option<String>,
}

/// A project together with its ordered images (public detail view).
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithImages {
    #[serde(flatten)]
    pub project: Project,
    pub images: Vec<ProjectImage>,
}
