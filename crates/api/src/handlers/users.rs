//! Handlers for `/admin/users` (backoffice accounts).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::roles::ROLE_ADMIN;
use vitrine_core::status::normalize_email;
use vitrine_core::types::DbId;
use vitrine_db::models::role::Role;
use vitrine_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use vitrine_db::repositories::{RoleRepo, SessionRepo, UserRepo};

use super::audit;
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub role_id: DbId,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let roles = RoleRepo::list(&state.pool).await?;
    let data = users
        .iter()
        .map(|u| UserResponse::from_user(u, role_name(&roles, u.role_id)))
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/admin/roles
pub async fn list_roles(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<Role>>>> {
    let roles = RoleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: roles }))
}

/// POST /api/v1/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    ensure_role_exists(&state, input.role_id).await?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username.trim().to_string(),
            email: normalize_email(&input.email),
            password_hash,
            role_id: input.role_id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = admin.user_id, "User created");
    audit::record(
        &state,
        &admin,
        action_types::ENTITY_CREATE,
        "users",
        Some(user.id),
        Some(json!({ "username": user.username, "role_id": user.role_id })),
    )
    .await;

    let response = user_to_response(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = find_user(&state, id).await?;
    let response = user_to_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Refuses to demote or deactivate the last active admin.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;
    let existing = find_user(&state, id).await?;

    if let Some(role_id) = input.role_id {
        ensure_role_exists(&state, role_id).await?;
    }
    let loses_admin = input.is_active == Some(false)
        || input.role_id.is_some_and(|r| r != existing.role_id);
    if loses_admin {
        guard_last_admin(&state, &existing).await?;
    }

    let update = UpdateUser {
        username: input.username.map(|u| u.trim().to_string()),
        email: input.email.as_deref().map(normalize_email),
        role_id: input.role_id,
        is_active: input.is_active,
    };
    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if input.is_active == Some(false) {
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    }

    audit::record(
        &state,
        &admin,
        action_types::ENTITY_UPDATE,
        "users",
        Some(id),
        Some(json!({ "role_id": update.role_id, "is_active": update.is_active })),
    )
    .await;

    let response = user_to_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Deactivate (users are never hard-deleted) and revoke their sessions.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "You cannot deactivate your own account".into(),
        )));
    }
    let existing = find_user(&state, id).await?;
    guard_last_admin(&state, &existing).await?;

    if !UserRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "User is already deactivated".into(),
        )));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, deactivated_by = admin.user_id, "User deactivated");
    audit::record(
        &state,
        &admin,
        action_types::ENTITY_DELETE,
        "users",
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Set a new password and sign the user out everywhere.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if !UserRepo::update_password(&state.pool, id, &password_hash).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    audit::record(
        &state,
        &admin,
        action_types::ENTITY_UPDATE,
        "users",
        Some(id),
        Some(json!({ "password_reset": true })),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

async fn user_to_response(state: &AppState, user: &User) -> AppResult<UserResponse> {
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(UserResponse::from_user(user, role))
}

async fn ensure_role_exists(state: &AppState, role_id: DbId) -> AppResult<()> {
    RoleRepo::find_by_id(&state.pool, role_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::Core(CoreError::Validation(format!("Unknown role id {role_id}"))))
}

/// Fail with 409 if `user` is the only active admin.
async fn guard_last_admin(state: &AppState, user: &User) -> AppResult<()> {
    let Some(admin_role) = RoleRepo::find_by_name(&state.pool, ROLE_ADMIN).await? else {
        return Ok(());
    };
    if user.role_id != admin_role.id || !user.is_active {
        return Ok(());
    }
    let others = UserRepo::count_active_with_role(&state.pool, admin_role.id, user.id).await?;
    if others == 0 {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot remove the last active admin".into(),
        )));
    }
    Ok(())
}

fn role_name(roles: &[Role], role_id: DbId) -> String {
    roles
        .iter()
        .find(|r| r.id == role_id)
        .map(|r| r.name.clone())
        .unwrap_or_default()
}

