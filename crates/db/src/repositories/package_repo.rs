//! Repository for the `packages` table.

use sqlx::types::Json;
use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::content_table::ContentTable;
use crate::models::package::{CreatePackage, Package, UpdatePackage};
use crate::repositories::SortableRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, price_cents, currency, billing_period, \
    features, is_featured, cta_label, cta_url, sort_order, is_active, deleted_at, \
    created_at, updated_at";

/// Currency used when a package is created without one.
const DEFAULT_CURRENCY: &str = "USD";

/// Provides CRUD operations for pricing packages.
pub struct PackageRepo;

impl PackageRepo {
    /// Insert a new package under `slug`.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePackage,
        slug: &str,
    ) -> Result<Package, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => SortableRepo::next_sort_order(&mut tx, ContentTable::Packages).await?,
        };
        let query = format!(
            "INSERT INTO packages \
                (name, slug, description, price_cents, currency, billing_period, features, \
                 is_featured, cta_label, cta_url, sort_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, false), $9, $10, $11, \
                     COALESCE($12, true)) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Package>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.description)
            .bind(input.price_cents)
            .bind(input.currency.as_deref().unwrap_or(DEFAULT_CURRENCY))
            .bind(&input.billing_period)
            .bind(Json(&input.features))
            .bind(input.is_featured)
            .bind(&input.cta_label)
            .bind(&input.cta_url)
            .bind(sort_order)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Find a live package by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Package>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM packages WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Package>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live packages in display order.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Package>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM packages \
             WHERE deleted_at IS NULL AND ($1 OR is_active = true) \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Package>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Update a package. Only non-`None` fields are applied; a supplied
    /// `features` list replaces the stored one.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePackage,
    ) -> Result<Option<Package>, sqlx::Error> {
        let query = format!(
            "UPDATE packages SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug), \
                description = COALESCE($4, description), \
                price_cents = COALESCE($5, price_cents), \
                currency = COALESCE($6, currency), \
                billing_period = COALESCE($7, billing_period), \
                features = COALESCE($8, features), \
                is_featured = COALESCE($9, is_featured), \
                cta_label = COALESCE($10, cta_label), \
                cta_url = COALESCE($11, cta_url), \
                is_active = COALESCE($12, is_active) \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Package>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.price_cents)
            .bind(&input.currency)
            .bind(&input.billing_period)
            .bind(input.features.as_ref().map(Json))
            .bind(input.is_featured)
            .bind(&input.cta_label)
            .bind(&input.cta_url)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
