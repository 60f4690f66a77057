//! Route definitions for `/public` (the marketing site, no auth).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`.
///
/// ```text
/// GET  /services                 -> list_services
/// GET  /services/{slug}          -> get_service
/// GET  /packages                 -> list_packages
/// GET  /gallery                  -> list_gallery (?category=)
/// GET  /projects                 -> list_projects (?category=)
/// GET  /projects/{slug}          -> get_project
/// GET  /reviews                  -> list_reviews
/// GET  /stats                    -> list_stats
/// GET  /faqs                     -> list_faqs (?category=)
/// GET  /about                    -> list_about
/// GET  /settings                 -> public_settings
/// GET  /seo                      -> seo_for_path (?path=)
/// POST /contact                  -> submit_contact
/// POST /newsletter/subscribe     -> subscribe
/// POST /newsletter/unsubscribe   -> unsubscribe
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/services", get(public::list_services))
        .route("/services/{slug}", get(public::get_service))
        .route("/packages", get(public::list_packages))
        .route("/gallery", get(public::list_gallery))
        .route("/projects", get(public::list_projects))
        .route("/projects/{slug}", get(public::get_project))
        .route("/reviews", get(public::list_reviews))
        .route("/stats", get(public::list_stats))
        .route("/faqs", get(public::list_faqs))
        .route("/about", get(public::list_about))
        .route("/settings", get(public::public_settings))
        .route("/seo", get(public::seo_for_path))
        .route("/contact", post(public::submit_contact))
        .route("/newsletter/subscribe", post(public::subscribe))
        .route("/newsletter/unsubscribe", post(public::unsubscribe))
}
