//! Admin handlers for the `/admin/packages` resource (pricing tiers).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use vitrine_core::audit::action_types;
use vitrine_core::error::CoreError;
use vitrine_core::slug::{resolve_slug, validate_slug};
use vitrine_core::types::DbId;
use vitrine_db::models::package::{CreatePackage, Package, UpdatePackage};
use vitrine_db::repositories::PackageRepo;

use super::{audit, require_text, require_text_opt};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// ISO 4217 codes are three ASCII letters.
fn validate_currency(currency: &str) -> AppResult<()> {
    if currency.len() == 3 && currency.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Invalid currency '{currency}': expected a three-letter ISO 4217 code"
        ))))
    }
}

fn validate_price(price_cents: i64) -> AppResult<()> {
    if price_cents < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "price_cents must not be negative".into(),
        )));
    }
    Ok(())
}

/// GET /api/v1/admin/packages
pub async fn list_packages(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Package>>>> {
    let packages = PackageRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: packages }))
}

/// POST /api/v1/admin/packages
pub async fn create_package(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreatePackage>,
) -> AppResult<(StatusCode, Json<DataResponse<Package>>)> {
    require_text("name", &input.name)?;
    validate_price(input.price_cents)?;
    if let Some(currency) = &input.currency {
        validate_currency(currency)?;
    }
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;

    let package = PackageRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(id = package.id, slug = %package.slug, user_id = user.user_id, "Package created");
    audit::record(
        &state,
        &user,
        action_types::ENTITY_CREATE,
        "packages",
        Some(package.id),
        Some(json!({ "name": package.name, "price_cents": package.price_cents })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: package })))
}

/// GET /api/v1/admin/packages/{id}
pub async fn get_package(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Package>>> {
    let package = PackageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Package",
            id,
        }))?;
    Ok(Json(DataResponse { data: package }))
}

/// PUT /api/v1/admin/packages/{id}
pub async fn update_package(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePackage>,
) -> AppResult<Json<DataResponse<Package>>> {
    require_text_opt("name", input.name.as_deref())?;
    if let Some(price) = input.price_cents {
        validate_price(price)?;
    }
    if let Some(currency) = &input.currency {
        validate_currency(currency)?;
    }
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }

    let package = PackageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Package",
            id,
        }))?;

    audit::record(
        &state,
        &user,
        action_types::ENTITY_UPDATE,
        "packages",
        Some(id),
        None,
    )
    .await;

    Ok(Json(DataResponse { data: package }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_codes() {
        assert!(validate_currency("EUR").is_ok());
        assert!(validate_currency("eur").is_err());
        assert!(validate_currency("EURO").is_err());
    }

    #[test]
    fn negative_price_rejected() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(-1).is_err());
    }
}
