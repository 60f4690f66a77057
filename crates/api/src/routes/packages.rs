//! Route definitions for `/admin/packages`.

use axum::routing::get;
use axum::Router;
use vitrine_db::ContentTable;

use super::sortable;
use crate::handlers::packages;
use crate::state::AppState;

/// Routes mounted at `/admin/packages`.
///
/// ```text
/// GET    /          -> list_packages (?include_inactive=true)
/// POST   /          -> create_package
/// GET    /{id}      -> get_package
/// PUT    /{id}      -> update_package
/// ```
///
/// Ordering, publish toggle, delete and restore come from
/// [`sortable::router`].
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(packages::list_packages).post(packages::create_package))
        .route("/{id}", get(packages::get_package).put(packages::update_package))
        .merge(sortable::router(ContentTable::Packages))
}
