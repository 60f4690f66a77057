//! Route definitions for the contact inbox and newsletter admin.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{contact, newsletter};
use crate::state::AppState;

/// Routes mounted at `/admin/contact`.
///
/// ```text
/// GET    /              -> list_submissions (?status=&search=&limit=&offset=)
/// GET    /{id}          -> get_submission
/// DELETE /{id}          -> delete_submission
/// PUT    /{id}/status   -> set_status
/// ```
pub fn contact_router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list_submissions))
        .route(
            "/{id}",
            get(contact::get_submission).delete(contact::delete_submission),
        )
        .route("/{id}/status", put(contact::set_status))
}

/// Routes mounted at `/admin/newsletter`.
///
/// ```text
/// GET    /          -> list_subscribers (?status=&limit=&offset=)
/// GET    /export    -> export_csv (?status=)
/// DELETE /{id}      -> delete_subscriber
/// ```
pub fn newsletter_router() -> Router<AppState> {
    Router::new()
        .route("/", get(newsletter::list_subscribers))
        .route("/export", get(newsletter::export_csv))
        .route("/{id}", delete(newsletter::delete_subscriber))
}
