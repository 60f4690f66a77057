//! Audit trail: the write helper every admin mutation calls, and the
//! admin-only query endpoint.

use axum::extract::{Query, State};
use axum::Json;
use vitrine_core::audit::redact_sensitive_fields;
use vitrine_core::types::DbId;
use vitrine_db::models::audit::{AuditLogPage, AuditQuery, CreateAuditLog};
use vitrine_db::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Record an action taken by an authenticated user.
///
/// Details are redacted before they are stored. A failed write is logged
/// and otherwise ignored so the mutation itself still succeeds.
pub async fn record(
    state: &AppState,
    actor: &AuthUser,
    action_type: &str,
    entity_type: &str,
    entity_id: Option<DbId>,
    details: Option<serde_json::Value>,
) {
    let entry = CreateAuditLog {
        user_id: Some(actor.user_id),
        action_type: action_type.to_string(),
        entity_type: Some(entity_type.to_string()),
        entity_id,
        details_json: details.as_ref().map(redact_sensitive_fields),
        ip_address: actor.ip_address.clone(),
    };
    write(state, &entry).await;
}

/// Record a login or logout, where no [`AuthUser`] exists yet.
pub async fn record_session_event(
    state: &AppState,
    user_id: DbId,
    action_type: &str,
    ip_address: Option<String>,
) {
    let entry = CreateAuditLog {
        user_id: Some(user_id),
        action_type: action_type.to_string(),
        entity_type: Some("users".to_string()),
        entity_id: Some(user_id),
        details_json: None,
        ip_address,
    };
    write(state, &entry).await;
}

async fn write(state: &AppState, entry: &CreateAuditLog) {
    if let Err(e) = AuditLogRepo::insert(&state.pool, entry).await {
        tracing::warn!(
            error = %e,
            action_type = %entry.action_type,
            entity_id = ?entry.entity_id,
            "Failed to write audit log entry"
        );
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/audit-logs
///
/// Filter by `user_id`, `action_type`, `entity_type`, `entity_id` and a
/// `from`/`to` time range. Newest first, paginated with `limit`/`offset`.
pub async fn list_audit_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AuditQuery>,
) -> AppResult<Json<DataResponse<AuditLogPage>>> {
    let items = AuditLogRepo::query(&state.pool, &params).await?;
    let total = AuditLogRepo::count(&state.pool, &params).await?;
    Ok(Json(DataResponse {
        data: AuditLogPage { items, total },
    }))
}
