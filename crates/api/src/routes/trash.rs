//! Route definitions for `/admin/trash`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::trash;
use crate::state::AppState;

/// Routes mounted at `/admin/trash`.
///
/// ```text
/// GET    /                       -> list_trashed (?type=services)
/// DELETE /                       -> purge_all (admin)
/// DELETE /{entity_type}/{id}     -> purge_one (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trash::list_trashed).delete(trash::purge_all))
        .route("/{entity_type}/{id}", delete(trash::purge_one))
}
