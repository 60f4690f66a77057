//! Repository for the append-only `audit_logs` table.

use sqlx::PgPool;
use vitrine_core::search::{clamp_limit, clamp_offset};

use crate::models::audit::{AuditLog, AuditQuery, CreateAuditLog};

const COLUMNS: &str =
    "id, user_id, action_type, entity_type, entity_id, details_json, ip_address, created_at";

/// Default and maximum page size for audit queries.
const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

/// Every filter is optional; a NULL parameter disables its condition.
const FILTER: &str = "($1::BIGINT IS NULL OR user_id = $1) \
    AND ($2::TEXT IS NULL OR action_type = $2) \
    AND ($3::TEXT IS NULL OR entity_type = $3) \
    AND ($4::BIGINT IS NULL OR entity_id = $4) \
    AND ($5::TIMESTAMPTZ IS NULL OR created_at >= $5) \
    AND ($6::TIMESTAMPTZ IS NULL OR created_at <= $6)";

pub struct AuditLogRepo;

impl AuditLogRepo {
    pub async fn insert(pool: &PgPool, entry: &CreateAuditLog) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs \
                (user_id, action_type, entity_type, entity_id, details_json, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(entry.user_id)
            .bind(&entry.action_type)
            .bind(&entry.entity_type)
            .bind(entry.entity_id)
            .bind(&entry.details_json)
            .bind(&entry.ip_address)
            .fetch_one(pool)
            .await
    }

    /// Newest first, filtered and paginated.
    pub async fn query(pool: &PgPool, params: &AuditQuery) -> Result<Vec<AuditLog>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(params.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs WHERE {FILTER} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $7 OFFSET $8"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(params.user_id)
            .bind(&params.action_type)
            .bind(&params.entity_type)
            .bind(params.entity_id)
            .bind(params.from)
            .bind(params.to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, params: &AuditQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM audit_logs WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(params.user_id)
            .bind(&params.action_type)
            .bind(&params.entity_type)
            .bind(params.entity_id)
            .bind(params.from)
            .bind(params.to)
            .fetch_one(pool)
            .await
    }
}
