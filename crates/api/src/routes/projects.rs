//! Route definitions for `/admin/projects` and project images.

use axum::routing::{get, put};
use axum::Router;
use vitrine_db::ContentTable;

use super::sortable;
use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/admin/projects`.
///
/// ```text
/// GET    /                              -> list_projects (?category=&include_inactive=true)
/// POST   /                              -> create_project
/// GET    /{id}                          -> get_project (with images)
/// PUT    /{id}                          -> update_project
/// GET    /{id}/images                   -> list_images
/// POST   /{id}/images                   -> add_image
/// PUT    /{id}/images/reorder           -> reorder_images
/// PUT    /{id}/images/{image_id}        -> update_image
/// DELETE /{id}/images/{image_id}        -> delete_image
/// ```
///
/// Plus the [`sortable::router`] routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects).post(projects::create_project))
        .route(
            "/{id}",
            get(projects::get_project).put(projects::update_project),
        )
        .route(
            "/{id}/images",
            get(projects::list_images).post(projects::add_image),
        )
        .route("/{id}/images/reorder", put(projects::reorder_images))
        .route(
            "/{id}/images/{image_id}",
            put(projects::update_image).delete(projects::delete_image),
        )
        .merge(sortable::router(ContentTable::Projects))
}
