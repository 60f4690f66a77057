//! Route definitions for `/admin/stats`.

use axum::routing::get;
use axum::Router;
use vitrine_db::ContentTable;

use super::sortable;
use crate::handlers::stats;
use crate::state::AppState;

/// Routes mounted at `/admin/stats`.
///
/// ```text
/// GET    /          -> list_stats (?include_inactive=true)
/// POST   /          -> create_stat
/// GET    /{id}      -> get_stat
/// PUT    /{id}      -> update_stat
/// ```
///
/// Ordering, publish toggle, delete and restore come from
/// [`sortable::router`].
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stats::list_stats).post(stats::create_stat))
        .route("/{id}", get(stats::get_stat).put(stats::update_stat))
        .merge(sortable::router(ContentTable::Stats))
}
