//! Route definitions for `/admin/about`.

use axum::routing::get;
use axum::Router;
use vitrine_db::ContentTable;

use super::sortable;
use crate::handlers::about;
use crate::state::AppState;

/// Routes mounted at `/admin/about`.
///
/// ```text
/// GET    /                -> list_sections (?include_inactive=true)
/// POST   /                -> create_section
/// GET    /section-types   -> list_section_types
/// GET    /{id}            -> get_section
/// PUT    /{id}            -> update_section
/// ```
///
/// Plus the [`sortable::router`] routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(about::list_sections).post(about::create_section))
        .route("/section-types", get(about::list_section_types))
        .route("/{id}", get(about::get_section).put(about::update_section))
        .merge(sortable::router(ContentTable::AboutContents))
}
