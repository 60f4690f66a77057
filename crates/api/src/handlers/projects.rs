//! Admin handlers for `/admin/projects` and their image galleries.
//!
//! Project images are not soft-deleted: they belong to their project and
//! are ordered within it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::ordering::{validate_permutation, SortAssignment};
use vitrine_core::slug::{resolve_slug, validate_slug};
use vitrine_core::types::DbId;
use vitrine_db::models::project::{
    CreateProject, CreateProjectImage, Project, ProjectImage, ProjectWithImages, UpdateProject,
    UpdateProjectImage,
};
use vitrine_db::repositories::{ProjectImageRepo, ProjectRepo};

use super::sortable::ReorderRequest;
use super::{audit, require_text, require_text_opt};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::CategoryParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/projects?category=&include_inactive=
pub async fn list_projects(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<CategoryParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects =
        ProjectRepo::list(&state.pool, params.include_inactive, params.category()).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/admin/projects
pub async fn create_project(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    require_text("title", &input.title)?;
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;

    let project = ProjectRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(id = project.id, slug = %project.slug, user_id = user.user_id, "Project created");
    audit::record(
        &state,
        &user,
        action_types::ENTITY_CREATE,
        "projects",
        Some(project.id),
        Some(json!({ "title": project.title, "slug": project.slug })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/admin/projects/{id}
///
/// The project together with its ordered images.
pub async fn get_project(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectWithImages>>> {
    let project = ensure_project(&state, id).await?;
    let images = ProjectImageRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: ProjectWithImages { project, images },
    }))
}

/// PUT /api/v1/admin/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    require_text_opt("title", input.title.as_deref())?;
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_UPDATE,
        "projects",
        Some(id),
        None,
    )
    .await;

    Ok(Json(DataResponse { data: project }))
}

// ---------------------------------------------------------------------------
// Project images
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/projects/{id}/images
pub async fn list_images(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectImage>>>> {
    ensure_project(&state, project_id).await?;
    let images = ProjectImageRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/admin/projects/{id}/images
///
/// Appended after the project's last image unless `sort_order` is given.
pub async fn add_image(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateProjectImage>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectImage>>)> {
    require_text("image_url", &input.image_url)?;
    ensure_project(&state, project_id).await?;

    let image = ProjectImageRepo::create(&state.pool, project_id, &input).await?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_CREATE,
        "project_images",
        Some(image.id),
        Some(json!({ "project_id": project_id })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// PUT /api/v1/admin/projects/{id}/images/{image_id}
pub async fn update_image(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path((project_id, image_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProjectImage>,
) -> AppResult<Json<DataResponse<ProjectImage>>> {
    require_text_opt("image_url", input.image_url.as_deref())?;

    let image = ProjectImageRepo::update(&state.pool, project_id, image_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProjectImage",
            id: image_id,
        }))?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_UPDATE,
        "project_images",
        Some(image_id),
        Some(json!({ "project_id": project_id })),
    )
    .await;

    Ok(Json(DataResponse { data: image }))
}

/// DELETE /api/v1/admin/projects/{id}/images/{image_id}
///
/// Permanent; returns 204.
pub async fn delete_image(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path((project_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !ProjectImageRepo::delete(&state.pool, project_id, image_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ProjectImage",
            id: image_id,
        }));
    }

    audit::record(
        &state,
        &user,
        action_types::ENTITY_PURGE,
        "project_images",
        Some(image_id),
        Some(json!({ "project_id": project_id })),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/projects/{id}/images/reorder
///
/// `ids` must list every image of the project exactly once.
pub async fn reorder_images(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<SortAssignment>>>> {
    ensure_project(&state, project_id).await?;

    let plan = |existing: &[DbId]| -> AppResult<Vec<DbId>> {
        validate_permutation(existing, &input.ids)?;
        Ok(input.ids.clone())
    };
    let assignments = ProjectImageRepo::reorder(&state.pool, project_id, plan).await?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_REORDER,
        "project_images",
        None,
        Some(json!({ "project_id": project_id, "ids": input.ids })),
    )
    .await;

    Ok(Json(DataResponse { data: assignments }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a live project or fail with 404.
async fn ensure_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}
