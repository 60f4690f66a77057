//! Admin handlers for the `/admin/gallery` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::gallery::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};
use vitrine_db::repositories::GalleryItemRepo;

use super::{audit, require_text, require_text_opt};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::CategoryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/gallery?category=&include_inactive=
pub async fn list_gallery(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<CategoryParams>,
) -> AppResult<Json<DataResponse<Vec<GalleryItem>>>> {
    let items =
        GalleryItemRepo::list(&state.pool, params.include_inactive, params.category()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/gallery/categories
///
/// Distinct categories in use, for the filter dropdown.
pub async fn list_categories(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let categories = GalleryItemRepo::list_categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/admin/gallery
pub async fn create_gallery_item(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateGalleryItem>,
) -> AppResult<(StatusCode, Json<DataResponse<GalleryItem>>)> {
    require_text("title", &input.title)?;
    require_text("image_url", &input.image_url)?;

    let item = GalleryItemRepo::create(&state.pool, &input).await?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_CREATE,
        "gallery_items",
        Some(item.id),
        Some(json!({ "title": item.title })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/admin/gallery/{id}
pub async fn get_gallery_item(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GalleryItem>>> {
    let item = GalleryItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GalleryItem",
            id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/admin/gallery/{id}
pub async fn update_gallery_item(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGalleryItem>,
) -> AppResult<Json<DataResponse<GalleryItem>>> {
    require_text_opt("title", input.title.as_deref())?;
    require_text_opt("image_url", input.image_url.as_deref())?;

    let item = GalleryItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GalleryItem",
            id,
        }))?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_UPDATE,
        "gallery_items",
        Some(id),
        None,
    )
    .await;

    Ok(Json(DataResponse { data: item }))
}
