//! Operations shared by every ordered, publishable content resource:
//! drag-and-drop reorder, single moves, publish toggle, soft delete and
//! restore.
//!
//! Each handler takes the [`ContentTable`] it operates on as its first
//! argument; `routes::sortable` binds it per resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::ordering::{move_item, validate_permutation, SortAssignment};
use vitrine_core::types::DbId;
use vitrine_db::repositories::SortableRepo;
use vitrine_db::ContentTable;

use crate::error::{AppError, AppResult};
use crate::handlers::audit;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `PUT /{resource}/reorder`: every live id in its new order.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<DbId>,
}

/// Body of `POST /{resource}/{id}/move`: zero-based target position.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub position: usize,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: DbId,
    pub is_active: bool,
}

/// PUT /api/v1/admin/{resource}/reorder
///
/// Replace the order of the whole table. The request must be a permutation
/// of the live ids (inactive rows included); anything else is a 400 and
/// leaves the stored order untouched.
pub async fn reorder(
    table: ContentTable,
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<SortAssignment>>>> {
    let plan = |live: &[DbId]| -> AppResult<Vec<DbId>> {
        validate_permutation(live, &input.ids)?;
        Ok(input.ids.clone())
    };
    let assignments = SortableRepo::reorder(&state.pool, table, plan).await?;

    tracing::info!(
        table = table.table(),
        count = assignments.len(),
        user_id = user.user_id,
        "Content reordered"
    );
    audit::record(
        &state,
        &user,
        action_types::ENTITY_REORDER,
        table.table(),
        None,
        Some(json!({ "ids": input.ids })),
    )
    .await;

    Ok(Json(DataResponse { data: assignments }))
}

/// POST /api/v1/admin/{resource}/{id}/move
///
/// Move one row to `position` (clamped to the end) and renumber the rest.
pub async fn move_to(
    table: ContentTable,
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<MoveRequest>,
) -> AppResult<Json<DataResponse<Vec<SortAssignment>>>> {
    let plan = |live: &[DbId]| -> AppResult<Vec<DbId>> {
        if !live.contains(&id) {
            return Err(AppError::Core(CoreError::NotFound {
                entity: table.entity_name(),
                id,
            }));
        }
        Ok(move_item(live, id, input.position)?)
    };
    let assignments = SortableRepo::reorder(&state.pool, table, plan).await?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_REORDER,
        table.table(),
        Some(id),
        Some(json!({ "position": input.position })),
    )
    .await;

    Ok(Json(DataResponse { data: assignments }))
}

/// POST /api/v1/admin/{resource}/{id}/toggle
///
/// Flip `is_active` (publish / unpublish).
pub async fn toggle(
    table: ContentTable,
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ToggleResponse>>> {
    let is_active = SortableRepo::toggle_active(&state.pool, table, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: table.entity_name(),
            id,
        }))?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_TOGGLE,
        table.table(),
        Some(id),
        Some(json!({ "is_active": is_active })),
    )
    .await;

    Ok(Json(DataResponse {
        data: ToggleResponse { id, is_active },
    }))
}

/// DELETE /api/v1/admin/{resource}/{id}
///
/// Soft delete. The row moves to the trash; returns 204.
pub async fn soft_delete(
    table: ContentTable,
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SortableRepo::soft_delete(&state.pool, table, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: table.entity_name(),
            id,
        }));
    }

    tracing::info!(table = table.table(), id, user_id = user.user_id, "Content moved to trash");
    audit::record(
        &state,
        &user,
        action_types::ENTITY_DELETE,
        table.table(),
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/{resource}/{id}/restore
///
/// Bring a trashed row back, appended after the current last row.
pub async fn restore(
    table: ContentTable,
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    if !SortableRepo::restore(&state.pool, table, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: table.entity_name(),
            id,
        }));
    }

    audit::record(
        &state,
        &user,
        action_types::ENTITY_RESTORE,
        table.table(),
        Some(id),
        None,
    )
    .await;

    Ok(Json(DataResponse {
        data: json!({ "restored": true, "entity_type": table, "id": id }),
    }))
}
