//! Route definitions for site configuration: settings and SEO metadata.

use axum::routing::get;
use axum::Router;

use crate::handlers::{seo, settings};
use crate::state::AppState;

/// Routes mounted at `/admin/settings` (admin only).
///
/// ```text
/// GET    /          -> list_settings
/// GET    /{key}     -> get_setting
/// PUT    /{key}     -> upsert_setting
/// DELETE /{key}     -> delete_setting
/// ```
pub fn settings_router() -> Router<AppState> {
    Router::new().route("/", get(settings::list_settings)).route(
        "/{key}",
        get(settings::get_setting)
            .put(settings::upsert_setting)
            .delete(settings::delete_setting),
    )
}

/// Routes mounted at `/admin/seo`.
///
/// ```text
/// GET    /          -> list_seo
/// POST   /          -> create_seo
/// GET    /{id}      -> get_seo
/// PUT    /{id}      -> update_seo
/// DELETE /{id}      -> delete_seo
/// ```
pub fn seo_router() -> Router<AppState> {
    Router::new()
        .route("/", get(seo::list_seo).post(seo::create_seo))
        .route(
            "/{id}",
            get(seo::get_seo).put(seo::update_seo).delete(seo::delete_seo),
        )
}
