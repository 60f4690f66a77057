//! Route definitions for user management and the audit trail (admin only).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{audit, users};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users                        -> list_users
/// POST   /users                        -> create_user
/// GET    /users/{id}                   -> get_user
/// PUT    /users/{id}                   -> update_user
/// DELETE /users/{id}                   -> deactivate_user
/// POST   /users/{id}/reset-password    -> reset_password
/// GET    /roles                        -> list_roles
/// GET    /audit-logs                   -> list_audit_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::deactivate_user),
        )
        .route("/users/{id}/reset-password", post(users::reset_password))
        .route("/roles", get(users::list_roles))
        .route("/audit-logs", get(audit::list_audit_logs))
}
