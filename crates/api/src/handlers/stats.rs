//! Admin handlers for the `/admin/stats` resource (headline numbers such
//! as "120+ projects delivered").

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::stat::{CreateStat, Stat, UpdateStat};
use vitrine_db::repositories::StatRepo;

use super::{audit, require_text, require_text_opt};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/stats
pub async fn list_stats(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Stat>>>> {
    let stats = StatRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// POST /api/v1/admin/stats
pub async fn create_stat(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateStat>,
) -> AppResult<(StatusCode, Json<DataResponse<Stat>>)> {
    require_text("label", &input.label)?;
    require_text("value", &input.value)?;

    let stat = StatRepo::create(&state.pool, &input).await?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_CREATE,
        "stats",
        Some(stat.id),
        Some(json!({ "label": stat.label, "value": stat.value })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: stat })))
}

/// GET /api/v1/admin/stats/{id}
pub async fn get_stat(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Stat>>> {
    let stat = StatRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Stat", id }))?;
    Ok(Json(DataResponse { data: stat }))
}

/// PUT /api/v1/admin/stats/{id}
pub async fn update_stat(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStat>,
) -> AppResult<Json<DataResponse<Stat>>> {
    require_text_opt("label", input.label.as_deref())?;
    require_text_opt("value", input.value.as_deref())?;

    let stat = StatRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Stat", id }))?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_UPDATE,
        "stats",
        Some(id),
        None,
    )
    .await;

    Ok(Json(DataResponse { data: stat }))
}
