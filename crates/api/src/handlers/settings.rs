//! Admin handlers for `/admin/settings` (site-wide key/value settings).
//!
//! All handlers require the `admin` role.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_db::models::setting::{Setting, UpsertSetting};
use vitrine_db::repositories::SettingRepo;

use super::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Longest accepted setting key.
const MAX_KEY_LENGTH: usize = 100;

/// Keys are lowercase snake_case identifiers, optionally dotted
/// (`social.instagram`).
fn validate_key(key: &str) -> AppResult<()> {
    let well_formed = !key.is_empty()
        && key.len() <= MAX_KEY_LENGTH
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.')
        && !key.starts_with('.')
        && !key.ends_with('.');
    if well_formed {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Invalid setting key '{key}'"
        ))))
    }
}

/// GET /api/v1/admin/settings
pub async fn list_settings(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<Setting>>>> {
    let settings = SettingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// GET /api/v1/admin/settings/{key}
pub async fn get_setting(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(key): Path<String>,
) -> AppResult<Json<DataResponse<Setting>>> {
    let setting = SettingRepo::find_by_key(&state.pool, &key)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_by_key("Setting", key)))?;
    Ok(Json(DataResponse { data: setting }))
}

/// PUT /api/v1/admin/settings/{key}
///
/// Create or replace a setting.
pub async fn upsert_setting(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(key): Path<String>,
    Json(input): Json<UpsertSetting>,
) -> AppResult<Json<DataResponse<Setting>>> {
    validate_key(&key)?;

    let setting = SettingRepo::upsert(&state.pool, &key, &input).await?;

    tracing::info!(key = %key, user_id = admin.user_id, "Setting saved");
    audit::record(
        &state,
        &admin,
        action_types::CONFIG_CHANGE,
        "settings",
        Some(setting.id),
        Some(json!({ "key": key, "value": setting.value })),
    )
    .await;

    Ok(Json(DataResponse { data: setting }))
}

/// DELETE /api/v1/admin/settings/{key}
pub async fn delete_setting(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(key): Path<String>,
) -> AppResult<StatusCode> {
    if !SettingRepo::delete(&state.pool, &key).await? {
        return Err(AppError::Core(CoreError::not_found_by_key("Setting", key)));
    }

    audit::record(
        &state,
        &admin,
        action_types::CONFIG_CHANGE,
        "settings",
        None,
        Some(json!({ "key": key, "deleted": true })),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_keys() {
        assert!(validate_key("site_name").is_ok());
        assert!(validate_key("social.instagram").is_ok());
        assert!(validate_key("Site Name").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("").is_err());
        assert!(validate_key(&"k".repeat(MAX_KEY_LENGTH + 1)).is_err());
    }
}
