//! Unauthenticated handlers backing the marketing site (`/public`).
//!
//! Reads only return active, non-deleted content in display order. The
//! only writes are the contact form and newsletter sign-up.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;
use vitrine_core::error::CoreError;
use vitrine_core::status::normalize_email;
use vitrine_core::types::DbId;
use vitrine_db::models::about::AboutContent;
use vitrine_db::models::contact::CreateContactSubmission;
use vitrine_db::models::faq::Faq;
use vitrine_db::models::gallery::GalleryItem;
use vitrine_db::models::newsletter::{CreateSubscription, SubscribeOutcome};
use vitrine_db::models::package::Package;
use vitrine_db::models::project::{Project, ProjectWithImages};
use vitrine_db::models::review::Review;
use vitrine_db::models::seo::SeoMetadata;
use vitrine_db::models::service::Service;
use vitrine_db::models::stat::Stat;
use vitrine_db::repositories::{
    AboutContentRepo, ContactSubmissionRepo, FaqRepo, GalleryItemRepo, NewsletterRepo,
    PackageRepo, ProjectImageRepo, ProjectRepo, ReviewRepo, SeoRepo, ServiceRepo, SettingRepo,
    StatRepo,
};

use super::require_text;
use super::seo::validate_page_path;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{client_ip, user_agent};
use crate::query::CategoryParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub company: Option<String>,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

/// Acknowledgement returned for a contact submission.
#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub id: DbId,
    pub received: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email, length(max = 254))]
    pub email: String,
    /// Where on the site the visitor signed up (footer, blog, ...).
    #[validate(length(max = 50))]
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub email: String,
    pub status: String,
    pub outcome: SubscribeOutcome,
}

#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct SeoParams {
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// GET /api/v1/public/services
pub async fn list_services(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = ServiceRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/v1/public/services/{slug}
pub async fn get_service(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Service>>> {
    let service = ServiceRepo::find_active_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_by_key("Service", slug)))?;
    Ok(Json(DataResponse { data: service }))
}

/// GET /api/v1/public/packages
pub async fn list_packages(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Package>>>> {
    let packages = PackageRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data: packages }))
}

/// GET /api/v1/public/gallery?category=
pub async fn list_gallery(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> AppResult<Json<DataResponse<Vec<GalleryItem>>>> {
    let items = GalleryItemRepo::list(&state.pool, false, params.category()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/public/projects?category=
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool, false, params.category()).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/public/projects/{slug}
///
/// Case study page: the project plus its images in order.
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ProjectWithImages>>> {
    let project = ProjectRepo::find_active_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_by_key("Project", slug)))?;
    let images = ProjectImageRepo::list_for_project(&state.pool, project.id).await?;
    Ok(Json(DataResponse {
        data: ProjectWithImages { project, images },
    }))
}

/// GET /api/v1/public/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    let reviews = ReviewRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// GET /api/v1/public/stats
pub async fn list_stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Stat>>>> {
    let stats = StatRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/public/faqs?category=
pub async fn list_faqs(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> AppResult<Json<DataResponse<Vec<Faq>>>> {
    let faqs = FaqRepo::list(&state.pool, false, params.category()).await?;
    Ok(Json(DataResponse { data: faqs }))
}

/// GET /api/v1/public/about
pub async fn list_about(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AboutContent>>>> {
    let sections = AboutContentRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data: sections }))
}

// ---------------------------------------------------------------------------
// Site configuration
// ---------------------------------------------------------------------------

/// GET /api/v1/public/settings
///
/// Settings flagged `is_public`, as a `key -> value` object.
pub async fn public_settings(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<serde_json::Map<String, serde_json::Value>>>> {
    let settings = SettingRepo::list_public(&state.pool).await?;
    let map = settings.into_iter().map(|s| (s.key, s.value)).collect();
    Ok(Json(DataResponse { data: map }))
}

/// GET /api/v1/public/seo?path=/about
pub async fn seo_for_path(
    State(state): State<AppState>,
    Query(params): Query<SeoParams>,
) -> AppResult<Json<DataResponse<SeoMetadata>>> {
    let path = params
        .path
        .ok_or_else(|| AppError::BadRequest("Query parameter 'path' is required".into()))?;
    validate_page_path(&path)?;

    let entry = SeoRepo::find_by_path(&state.pool, &path)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_by_key("SeoMetadata", path)))?;
    Ok(Json(DataResponse { data: entry }))
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// POST /api/v1/public/contact
///
/// Store the submission and notify staff in the background. Returns 201
/// without waiting for the notification.
pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ContactReceipt>>)> {
    input.validate()?;
    require_text("name", &input.name)?;
    require_text("message", &input.message)?;

    let submission = ContactSubmissionRepo::create(
        &state.pool,
        &CreateContactSubmission {
            name: input.name.trim().to_string(),
            email: normalize_email(&input.email),
            phone: non_blank(input.phone),
            company: non_blank(input.company),
            subject: non_blank(input.subject),
            message: input.message.trim().to_string(),
            ip_address: client_ip(&headers),
            user_agent: user_agent(&headers),
        },
    )
    .await?;

    tracing::info!(submission_id = submission.id, "Contact form submitted");

    let notifier = state.notifier.clone();
    let receipt = ContactReceipt {
        id: submission.id,
        received: true,
    };
    tokio::spawn(async move {
        if let Err(e) = notifier.contact_received(&submission).await {
            tracing::error!(
                submission_id = submission.id,
                error = %e,
                "Failed to send contact notification"
            );
        }
    });

    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

/// POST /api/v1/public/newsletter/subscribe
///
/// 201 for a new address, 200 when re-subscribing or already subscribed.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<SubscribeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SubscribeResponse>>)> {
    input.validate()?;

    let (subscription, outcome) = NewsletterRepo::subscribe(
        &state.pool,
        &CreateSubscription {
            email: normalize_email(&input.email),
            source: non_blank(input.source),
        },
    )
    .await?;

    tracing::info!(subscription_id = subscription.id, ?outcome, "Newsletter subscribe");

    let status = match outcome {
        SubscribeOutcome::Created => StatusCode::CREATED,
        SubscribeOutcome::Resubscribed | SubscribeOutcome::AlreadySubscribed => StatusCode::OK,
    };
    Ok((
        status,
        Json(DataResponse {
            data: SubscribeResponse {
                email: subscription.email,
                status: subscription.status,
                outcome,
            },
        }),
    ))
}

/// POST /api/v1/public/newsletter/unsubscribe
///
/// Idempotent for a known token; 404 for an unknown one.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(input): Json<UnsubscribeRequest>,
) -> AppResult<StatusCode> {
    let token = input.token.trim();
    let subscription = NewsletterRepo::unsubscribe_by_token(&state.pool, token)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found_by_key(
                "NewsletterSubscription",
                "unsubscribe token",
            ))
        })?;

    tracing::info!(subscription_id = subscription.id, "Newsletter unsubscribe");
    Ok(StatusCode::NO_CONTENT)
}

/// Trim an optional field, treating blank as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some("  Acme ".into())).as_deref(), Some("Acme"));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn contact_request_validation() {
        let valid = ContactRequest {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            phone: None,
            company: None,
            subject: Some("Hello".into()),
            message: "Can we talk?".into(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = ContactRequest {
            email: "not-an-email".into(),
            ..valid
        };
        let errors = bad_email.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
