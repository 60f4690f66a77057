//! Repository for the `contact_submissions` table.

use sqlx::PgPool;
use vitrine_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use vitrine_core::types::DbId;

use crate::models::contact::{
    ContactQuery, ContactSubmission, CreateContactSubmission, StatusCount,
};

const COLUMNS: &str = "id, name, email, phone, company, subject, message, status, \
    ip_address, user_agent, deleted_at, created_at, updated_at";

/// Shared filter for list and count. `$1` is the status, `$2` an ILIKE
/// pattern matched against name, email, subject and message.
const FILTER: &str = "deleted_at IS NULL \
    AND ($1::TEXT IS NULL OR status = $1) \
    AND ($2::TEXT IS NULL OR name ILIKE $2 OR email ILIKE $2 \
         OR subject ILIKE $2 OR message ILIKE $2)";

/// Provides storage and triage operations for contact submissions.
pub struct ContactSubmissionRepo;

impl ContactSubmissionRepo {
    /// Record a new submission with status `new`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactSubmission,
    ) -> Result<ContactSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_submissions \
                (name, email, phone, company, subject, message, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.company)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_submissions WHERE id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Newest first, filtered and paginated.
    pub async fn list(
        pool: &PgPool,
        params: &ContactQuery,
    ) -> Result<Vec<ContactSubmission>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(params.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM contact_submissions WHERE {FILTER} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(&params.status)
            .bind(search_pattern(params.search.as_deref()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows matching the same filter as [`Self::list`].
    pub async fn count(pool: &PgPool, params: &ContactQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM contact_submissions WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&params.status)
            .bind(search_pattern(params.search.as_deref()))
            .fetch_one(pool)
            .await
    }

    /// Live submission counts grouped by status.
    pub async fn status_counts(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM contact_submissions \
             WHERE deleted_at IS NULL GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Move a submission to a new workflow status.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_submissions SET status = $2 \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a submission. Returns `true` if a live row was hidden.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE contact_submissions SET deleted_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Wrap a free-text search in `%...%`, escaping LIKE metacharacters.
fn search_pattern(search: Option<&str>) -> Option<String> {
    let term = search.map(str::trim).filter(|s| !s.is_empty())?;
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}
