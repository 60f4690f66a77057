//! Route definitions for `/admin/faqs`.

use axum::routing::get;
use axum::Router;
use vitrine_db::ContentTable;

use super::sortable;
use crate::handlers::faqs;
use crate::state::AppState;

/// Routes mounted at `/admin/faqs`.
///
/// ```text
/// GET    /          -> list_faqs (?category=&include_inactive=true)
/// POST   /          -> create_faq
/// GET    /{id}      -> get_faq
/// PUT    /{id}      -> update_faq
/// ```
///
/// Ordering, publish toggle, delete and restore come from
/// [`sortable::router`].
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(faqs::list_faqs).post(faqs::create_faq))
        .route("/{id}", get(faqs::get_faq).put(faqs::update_faq))
        .merge(sortable::router(ContentTable::Faqs))
}
