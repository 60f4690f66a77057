//! Admin handlers for the `/admin/reviews` resource (testimonials).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::review::{CreateReview, Review, UpdateReview};
use vitrine_db::repositories::ReviewRepo;

use super::{audit, require_text, require_text_opt};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_rating(rating: Option<i16>) -> AppResult<()> {
    match rating {
        Some(r) if !(1..=5).contains(&r) => Err(AppError::Core(CoreError::Validation(format!(
            "Rating must be between 1 and 5, got {r}"
        )))),
        _ => Ok(()),
    }
}

/// GET /api/v1/admin/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    let reviews = ReviewRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// POST /api/v1/admin/reviews
pub async fn create_review(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    require_text("author_name", &input.author_name)?;
    require_text("content", &input.content)?;
    validate_rating(input.rating)?;

    let review = ReviewRepo::create(&state.pool, &input).await?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_CREATE,
        "reviews",
        Some(review.id),
        Some(json!({ "author_name": review.author_name })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// GET /api/v1/admin/reviews/{id}
pub async fn get_review(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Review>>> {
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;
    Ok(Json(DataResponse { data: review }))
}

/// PUT /api/v1/admin/reviews/{id}
pub async fn update_review(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReview>,
) -> AppResult<Json<DataResponse<Review>>> {
    require_text_opt("author_name", input.author_name.as_deref())?;
    require_text_opt("content", input.content.as_deref())?;
    validate_rating(input.rating)?;

    let review = ReviewRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_UPDATE,
        "reviews",
        Some(id),
        None,
    )
    .await;

    Ok(Json(DataResponse { data: review }))
}
