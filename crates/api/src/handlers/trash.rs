//! Handlers for `/admin/trash`, the cross-table view of soft-deleted
//! content.
//!
//! Listing is open to editors; purging is admin only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::repositories::trash_repo::TrashedItem;
use vitrine_db::repositories::{SortableRepo, TrashRepo};
use vitrine_db::ContentTable;

use super::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TrashQuery {
    /// Table name filter, e.g. `services` or `gallery_items`.
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
}

/// GET /api/v1/admin/trash?type=
pub async fn list_trashed(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<TrashQuery>,
) -> AppResult<Json<DataResponse<Vec<TrashedItem>>>> {
    let table = params
        .entity_type
        .as_deref()
        .map(parse_entity_type)
        .transpose()?;
    let items = TrashRepo::list_trashed(&state.pool, table).await?;
    Ok(Json(DataResponse { data: items }))
}

/// DELETE /api/v1/admin/trash/{entity_type}/{id}
///
/// Permanently delete one trashed row.
pub async fn purge_one(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((entity_type, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let table = parse_entity_type(&entity_type)?;
    if !SortableRepo::hard_delete(&state.pool, table, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TrashedItem",
            id,
        }));
    }

    audit::record(
        &state,
        &admin,
        action_types::ENTITY_PURGE,
        table.table(),
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/trash
///
/// Empty the trash across every content table.
pub async fn purge_all(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let purged = TrashRepo::purge_all(&state.pool).await?;

    tracing::info!(purged, user_id = admin.user_id, "Trash emptied");
    audit::record(
        &state,
        &admin,
        action_types::ENTITY_PURGE,
        "trash",
        None,
        Some(json!({ "purged": purged })),
    )
    .await;

    Ok(Json(DataResponse {
        data: json!({ "purged": purged }),
    }))
}

fn parse_entity_type(entity_type: &str) -> AppResult<ContentTable> {
    ContentTable::from_table_name(entity_type)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown entity type: {entity_type}")))
}
