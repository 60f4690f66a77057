//! Admin handlers for `/admin/contact` (contact form inbox).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::status::SubmissionStatus;
use vitrine_core::types::DbId;
use vitrine_db::models::contact::{ContactQuery, ContactSubmission, StatusCount};
use vitrine_db::repositories::ContactSubmissionRepo;

use super::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// Body of `PUT /admin/contact/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// Inbox listing plus per-status counts for the filter tabs.
#[derive(Debug, Serialize)]
pub struct ContactInbox {
    #[serde(flatten)]
    pub page: Page<ContactSubmission>,
    pub status_counts: Vec<StatusCount>,
}

/// GET /api/v1/admin/contact?status=&search=&limit=&offset=
pub async fn list_submissions(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<ContactQuery>,
) -> AppResult<Json<DataResponse<ContactInbox>>> {
    if let Some(status) = &params.status {
        SubmissionStatus::parse(status)?;
    }

    let items = ContactSubmissionRepo::list(&state.pool, &params).await?;
    let total = ContactSubmissionRepo::count(&state.pool, &params).await?;
    let status_counts = ContactSubmissionRepo::status_counts(&state.pool).await?;

    Ok(Json(DataResponse {
        data: ContactInbox {
            page: Page { items, total },
            status_counts,
        },
    }))
}

/// GET /api/v1/admin/contact/{id}
pub async fn get_submission(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContactSubmission>>> {
    let submission = ContactSubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContactSubmission",
            id,
        }))?;
    Ok(Json(DataResponse { data: submission }))
}

/// PUT /api/v1/admin/contact/{id}/status
///
/// Move a submission through `new`, `read`, `replied`, `archived`.
pub async fn set_status(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<DataResponse<ContactSubmission>>> {
    let status = SubmissionStatus::parse(&input.status)?;

    let submission = ContactSubmissionRepo::set_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContactSubmission",
            id,
        }))?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_UPDATE,
        "contact_submissions",
        Some(id),
        Some(json!({ "status": status.as_str() })),
    )
    .await;

    Ok(Json(DataResponse { data: submission }))
}

/// DELETE /api/v1/admin/contact/{id}
pub async fn delete_submission(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ContactSubmissionRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ContactSubmission",
            id,
        }));
    }

    audit::record(
        &state,
        &user,
        action_types::ENTITY_DELETE,
        "contact_submissions",
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
