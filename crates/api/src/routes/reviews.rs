//! Route definitions for `/admin/reviews`.

use axum::routing::get;
use axum::Router;
use vitrine_db::ContentTable;

use super::sortable;
use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/admin/reviews`.
///
/// ```text
/// GET    /          -> list_reviews (?include_inactive=true)
/// POST   /          -> create_review
/// GET    /{id}      -> get_review
/// PUT    /{id}      -> update_review
/// ```
///
/// Ordering, publish toggle, delete and restore come from
/// [`sortable::router`].
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list_reviews).post(reviews::create_review))
        .route("/{id}", get(reviews::get_review).put(reviews::update_review))
        .merge(sortable::router(ContentTable::Reviews))
}
