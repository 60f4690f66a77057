//! Handlers for the `/auth` resource (login, refresh, logout, me).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::session::CreateSession;
use vitrine_db::models::user::{User, UserResponse};
use vitrine_db::repositories::{RoleRepo, SessionRepo, UserRepo};

use super::audit;
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{client_ip, user_agent, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`. `login` is a username or email.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "username", alias = "email")]
    pub login: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username (or email) + password.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))
    };

    let user = UserRepo::find_by_login(&state.pool, input.login.trim())
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let failures = UserRepo::increment_failed_login(&state.pool, user.id).await?;
        if failures >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(user_id = user.id, failures, "Account locked after failed logins");
        }
        return Err(invalid());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let ip_address = client_ip(&headers);
    let response = create_auth_response(&state, &user, &headers, None).await?;

    tracing::info!(user_id = user.id, role = %response.user.role, "User logged in");
    audit::record_session_event(&state, user.id, action_types::LOGIN, ip_address).await;

    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new pair. The old token is spent; if it
/// is ever presented again every session of that user is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    };

    let token_hash = hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::find_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid)?;

    if session.is_reused() {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, session.user_id).await?;
        tracing::warn!(
            user_id = session.user_id,
            session_id = session.id,
            revoked,
            "Rotated refresh token reused, all sessions revoked"
        );
        return Err(invalid());
    }
    if !session.is_live(Utc::now()) {
        return Err(invalid());
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, &user, &headers, Some(session.id)).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/logout
///
/// Revoke every session of the caller. Returns 204.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    audit::record_session_event(
        &state,
        auth_user.user_id,
        action_types::LOGOUT,
        auth_user.ip_address.clone(),
    )
    .await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from_user(&user, role),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue tokens, persist a session row, and build the response.
///
/// With `rotating`, the new session replaces that one atomically; losing a
/// race against a concurrent refresh of the same token is a 401.
async fn create_auth_response(
    state: &AppState,
    user: &User,
    headers: &HeaderMap,
    rotating: Option<DbId>,
) -> AppResult<AuthResponse> {
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    let access_token = generate_access_token(user.id, &role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let session = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at: Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days),
        user_agent: user_agent(headers),
        ip_address: client_ip(headers),
    };

    match rotating {
        None => {
            SessionRepo::create(&state.pool, &session).await?;
        }
        Some(old_id) => {
            SessionRepo::rotate(&state.pool, old_id, &session)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized(
                        "Refresh token was already used".into(),
                    ))
                })?;
        }
    }

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from_user(user, role),
    })
}
