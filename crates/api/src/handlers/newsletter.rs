//! Admin handlers for `/admin/newsletter` (subscriber list).

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::status::SubscriptionStatus;
use vitrine_core::types::DbId;
use vitrine_db::models::newsletter::{NewsletterSubscription, SubscriptionQuery};
use vitrine_db::repositories::NewsletterRepo;

use super::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// `?status=` filter for the CSV export.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub status: Option<String>,
}

/// GET /api/v1/admin/newsletter?status=&limit=&offset=
pub async fn list_subscribers(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<SubscriptionQuery>,
) -> AppResult<Json<DataResponse<Page<NewsletterSubscription>>>> {
    if let Some(status) = &params.status {
        SubscriptionStatus::parse(status)?;
    }

    let items = NewsletterRepo::list(&state.pool, &params).await?;
    let total = NewsletterRepo::count(&state.pool, params.status.as_deref()).await?;
    Ok(Json(DataResponse {
        data: Page { items, total },
    }))
}

/// GET /api/v1/admin/newsletter/export?status=subscribed
///
/// Download subscribers as `text/csv`.
pub async fn export_csv(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Query(params): Query<ExportParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = &params.status {
        SubscriptionStatus::parse(status)?;
    }

    let rows = NewsletterRepo::list_all(&state.pool, params.status.as_deref()).await?;
    tracing::info!(rows = rows.len(), user_id = user.user_id, "Newsletter export");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"newsletter.csv\"",
            ),
        ],
        build_csv(&rows),
    ))
}

/// DELETE /api/v1/admin/newsletter/{id}
///
/// Permanent removal, for erasure requests.
pub async fn delete_subscriber(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NewsletterRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "NewsletterSubscription",
            id,
        }));
    }

    audit::record(
        &state,
        &user,
        action_types::ENTITY_PURGE,
        "newsletter_subscriptions",
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// CSV helpers
// ---------------------------------------------------------------------------

const CSV_HEADER: &str = "email,status,source,subscribed_at,unsubscribed_at";

fn build_csv(rows: &[NewsletterSubscription]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        let fields = [
            csv_escape(&row.email),
            csv_escape(&row.status),
            csv_escape(row.source.as_deref().unwrap_or("")),
            row.subscribed_at.to_rfc3339(),
            row.unsubscribed_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Quote a value if it contains a comma, quote or newline.
fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn row(email: &str, source: Option<&str>) -> NewsletterSubscription {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        NewsletterSubscription {
            id: 1,
            email: email.into(),
            status: "subscribed".into(),
            unsubscribe_token: "t".into(),
            source: source.map(str::to_string),
            subscribed_at: at,
            unsubscribed_at: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn csv_has_header_and_one_line_per_row() {
        let csv = build_csv(&[row("a@example.com", Some("footer")), row("b@example.com", None)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "a@example.com,subscribed,footer,2026-03-01T09:30:00+00:00,"
        );
        assert!(lines[2].starts_with("b@example.com,subscribed,,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn csv_escape_quotes_special_values() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("blog, footer"), "\"blog, footer\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
