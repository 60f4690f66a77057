//! Admin handlers for `/admin/seo` (per-page metadata).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::seo::{CreateSeoMetadata, SeoMetadata, UpdateSeoMetadata};
use vitrine_db::repositories::SeoRepo;

use super::{audit, require_text, require_text_opt};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Page paths are absolute site paths without query or fragment.
pub(crate) fn validate_page_path(path: &str) -> AppResult<()> {
    if !path.starts_with('/') || path.contains(['?', '#', ' ']) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid page path '{path}': expected an absolute path such as /about"
        ))));
    }
    Ok(())
}

/// GET /api/v1/admin/seo
pub async fn list_seo(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
) -> AppResult<Json<DataResponse<Vec<SeoMetadata>>>> {
    let entries = SeoRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/admin/seo
pub async fn create_seo(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateSeoMetadata>,
) -> AppResult<(StatusCode, Json<DataResponse<SeoMetadata>>)> {
    validate_page_path(&input.page_path)?;
    require_text("title", &input.title)?;

    let entry = SeoRepo::create(&state.pool, &input).await?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_CREATE,
        "seo_metadata",
        Some(entry.id),
        Some(json!({ "page_path": entry.page_path })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/v1/admin/seo/{id}
pub async fn get_seo(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SeoMetadata>>> {
    let entry = SeoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SeoMetadata",
            id,
        }))?;
    Ok(Json(DataResponse { data: entry }))
}

/// PUT /api/v1/admin/seo/{id}
pub async fn update_seo(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSeoMetadata>,
) -> AppResult<Json<DataResponse<SeoMetadata>>> {
    if let Some(path) = &input.page_path {
        validate_page_path(path)?;
    }
    require_text_opt("title", input.title.as_deref())?;

    let entry = SeoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SeoMetadata",
            id,
        }))?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_UPDATE,
        "seo_metadata",
        Some(id),
        None,
    )
    .await;

    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/admin/seo/{id}
pub async fn delete_seo(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SeoRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SeoMetadata",
            id,
        }));
    }

    audit::record(
        &state,
        &user,
        action_types::ENTITY_PURGE,
        "seo_metadata",
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
