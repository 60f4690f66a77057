pub mod about;
pub mod admin;
pub mod auth;
pub mod faqs;
pub mod gallery;
pub mod health;
pub mod inbound;
pub mod packages;
pub mod projects;
pub mod public;
pub mod reviews;
pub mod services;
pub mod site;
pub mod sortable;
pub mod stats;
pub mod trash;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                   login (public)
/// /auth/refresh                                 refresh (public)
/// /auth/logout                                  logout (requires auth)
/// /auth/me                                      current user
///
/// /public/...                                   marketing site reads, contact
///                                               form, newsletter (no auth)
///
/// /admin/{services,packages,gallery,projects,
///         reviews,stats,faqs,about}             list, create
/// /admin/{resource}/{id}                        get, update, soft delete
/// /admin/{resource}/reorder                     full reorder (PUT)
/// /admin/{resource}/{id}/move                   single move (POST)
/// /admin/{resource}/{id}/toggle                 publish / unpublish (POST)
/// /admin/{resource}/{id}/restore                restore from trash (POST)
/// /admin/projects/{id}/images                   list, add
/// /admin/projects/{id}/images/reorder           reorder images (PUT)
/// /admin/projects/{id}/images/{image_id}        update, delete
///
/// /admin/contact                                inbox (editor)
/// /admin/newsletter                             subscribers, CSV export (editor)
/// /admin/seo                                    per-page metadata (editor)
/// /admin/trash                                  list (editor), purge (admin)
/// /admin/settings                               site settings (admin)
/// /admin/users                                  accounts (admin)
/// /admin/roles                                  role list (admin)
/// /admin/audit-logs                             audit trail (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    let admin = Router::new()
        .nest("/services", services::router())
        .nest("/packages", packages::router())
        .nest("/gallery", gallery::router())
        .nest("/projects", projects::router())
        .nest("/reviews", reviews::router())
        .nest("/stats", stats::router())
        .nest("/faqs", faqs::router())
        .nest("/about", about::router())
        .nest("/contact", inbound::contact_router())
        .nest("/newsletter", inbound::newsletter_router())
        .nest("/seo", site::seo_router())
        .nest("/settings", site::settings_router())
        .nest("/trash", trash::router())
        .merge(admin::router());

    Router::new()
        .nest("/auth", auth::router())
        .nest("/public", public::router())
        .nest("/admin", admin)
}
