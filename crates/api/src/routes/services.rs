//! Route definitions for `/admin/services`.

use axum::routing::get;
use axum::Router;
use vitrine_db::ContentTable;

use super::sortable;
use crate::handlers::services;
use crate::state::AppState;

/// Routes mounted at `/admin/services`.
///
/// ```text
/// GET    /          -> list_services (?include_inactive=true)
/// POST   /          -> create_service
/// GET    /{id}      -> get_service
/// PUT    /{id}      -> update_service
/// ```
///
/// Ordering, publish toggle, delete and restore come from
/// [`sortable::router`].
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(services::list_services).post(services::create_service))
        .route("/{id}", get(services::get_service).put(services::update_service))
        .merge(sortable::router(ContentTable::Services))
}
