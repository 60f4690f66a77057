//! Admin handlers for the `/admin/services` resource.
//!
//! Reorder, move, toggle, delete and restore live in [`super::sortable`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::slug::{resolve_slug, validate_slug};
use vitrine_core::types::DbId;
use vitrine_db::models::service::{CreateService, Service, UpdateService};
use vitrine_db::repositories::ServiceRepo;

use super::{audit, require_text, require_text_opt};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/services
pub async fn list_services(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = ServiceRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: services }))
}

/// POST /api/v1/admin/services
///
/// The slug is derived from the title when not supplied.
pub async fn create_service(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateService>,
) -> AppResult<(StatusCode, Json<DataResponse<Service>>)> {
    require_text("title", &input.title)?;
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;

    let service = ServiceRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(id = service.id, slug = %service.slug, user_id = user.user_id, "Service created");
    audit::record(
        &state,
        &user,
        action_types::ENTITY_CREATE,
        "services",
        Some(service.id),
        Some(json!({ "title": service.title, "slug": service.slug })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

/// GET /api/v1/admin/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Service>>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;
    Ok(Json(DataResponse { data: service }))
}

/// PUT /api/v1/admin/services/{id}
pub async fn update_service(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateService>,
) -> AppResult<Json<DataResponse<Service>>> {
    require_text_opt("title", input.title.as_deref())?;
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }

    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_UPDATE,
        "services",
        Some(id),
        None,
    )
    .await;

    Ok(Json(DataResponse { data: service }))
}
