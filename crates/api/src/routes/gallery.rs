//! Route definitions for `/admin/gallery`.

use axum::routing::get;
use axum::Router;
use vitrine_db::ContentTable;

use super::sortable;
use crate::handlers::gallery;
use crate::state::AppState;

/// Routes mounted at `/admin/gallery`.
///
/// ```text
/// GET    /             -> list_gallery (?category=&include_inactive=true)
/// POST   /             -> create_gallery_item
/// GET    /categories   -> list_categories
/// GET    /{id}         -> get_gallery_item
/// PUT    /{id}         -> update_gallery_item
/// ```
///
/// Plus the [`sortable::router`] routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::list_gallery).post(gallery::create_gallery_item))
        .route("/categories", get(gallery::list_categories))
        .route(
            "/{id}",
            get(gallery::get_gallery_item).put(gallery::update_gallery_item),
        )
        .merge(sortable::router(ContentTable::GalleryItems))
}
