//! Admin handlers for the `/admin/faqs` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::faq::{CreateFaq, Faq, UpdateFaq};
use vitrine_db::repositories::FaqRepo;

use super::{audit, require_text, require_text_opt};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::CategoryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/faqs?category=&include_inactive=
pub async fn list_faqs(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<CategoryParams>,
) -> AppResult<Json<DataResponse<Vec<Faq>>>> {
    let faqs = FaqRepo::list(&state.pool, params.include_inactive, params.category()).await?;
    Ok(Json(DataResponse { data: faqs }))
}

/// POST /api/v1/admin/faqs
pub async fn create_faq(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateFaq>,
) -> AppResult<(StatusCode, Json<DataResponse<Faq>>)> {
    require_text("question", &input.question)?;
    require_text("answer", &input.answer)?;

    let faq = FaqRepo::create(&state.pool, &input).await?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_CREATE,
        "faqs",
        Some(faq.id),
        Some(json!({ "question": faq.question })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: faq })))
}

/// GET /api/v1/admin/faqs/{id}
pub async fn get_faq(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Faq>>> {
    let faq = FaqRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Faq", id }))?;
    Ok(Json(DataResponse { data: faq }))
}

/// PUT /api/v1/admin/faqs/{id}
pub async fn update_faq(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFaq>,
) -> AppResult<Json<DataResponse<Faq>>> {
    require_text_opt("question", input.question.as_deref())?;
    require_text_opt("answer", input.answer.as_deref())?;

    let faq = FaqRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Faq", id }))?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_UPDATE,
        "faqs",
        Some(id),
        None,
    )
    .await;

    Ok(Json(DataResponse { data: faq }))
}
