//! Admin handlers for `/admin/about` (about-page sections).
//!
//! Every write validates `content` against the schema of its
//! `section_type` before it reaches the database.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use vitrine_core::about::{validate_section, SectionType};
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::about::{AboutContent, CreateAboutContent, UpdateAboutContent};
use vitrine_db::repositories::AboutContentRepo;

use super::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/about
pub async fn list_sections(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<AboutContent>>>> {
    let sections = AboutContentRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: sections }))
}

/// GET /api/v1/admin/about/section-types
pub async fn list_section_types(
    RequireEditor(_user): RequireEditor,
) -> Json<DataResponse<Vec<&'static str>>> {
    let types = SectionType::ALL.iter().map(|t| t.as_str()).collect();
    Json(DataResponse { data: types })
}

/// POST /api/v1/admin/about
pub async fn create_section(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateAboutContent>,
) -> AppResult<(StatusCode, Json<DataResponse<AboutContent>>)> {
    let section_type = SectionType::parse(&input.section_type)?;
    validate_section(section_type, &input.content)?;

    let section = AboutContentRepo::create(&state.pool, &input).await?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_CREATE,
        "about_contents",
        Some(section.id),
        Some(json!({ "section_type": section.section_type })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: section })))
}

/// GET /api/v1/admin/about/{id}
pub async fn get_section(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AboutContent>>> {
    let section = find_section(&state, id).await?;
    Ok(Json(DataResponse { data: section }))
}

/// PUT /api/v1/admin/about/{id}
///
/// Changing either `section_type` or `content` re-validates the pair that
/// would be stored, so a type change without matching content is rejected.
pub async fn update_section(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAboutContent>,
) -> AppResult<Json<DataResponse<AboutContent>>> {
    if input.section_type.is_some() || input.content.is_some() {
        let existing = find_section(&state, id).await?;
        let section_type =
            SectionType::parse(input.section_type.as_deref().unwrap_or(&existing.section_type))?;
        let content = input.content.as_ref().unwrap_or(&existing.content);
        validate_section(section_type, content)?;
    }

    let section = AboutContentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AboutContent",
            id,
        }))?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_UPDATE,
        "about_contents",
        Some(id),
        Some(json!({ "section_type": section.section_type })),
    )
    .await;

    Ok(Json(DataResponse { data: section }))
}

async fn find_section(state: &AppState, id: DbId) -> AppResult<AboutContent> {
    AboutContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AboutContent",
            id,
        }))
}
