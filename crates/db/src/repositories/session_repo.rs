//! Refresh-token sessions: issue, rotate, revoke, expire.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::session::{CreateSession, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, revoked_at, \
    replaced_by, user_agent, ip_address, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions \
                (user_id, refresh_token_hash, expires_at, user_agent, ip_address) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .fetch_one(pool)
            .await
    }

    /// Look up a session by token hash whatever its state; callers decide
    /// between live, expired, revoked and reused.
    pub async fn find_by_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_sessions WHERE refresh_token_hash = $1");
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Exchange live session `old_id` for a new one in one transaction.
    ///
    /// Returns `None` without writing anything when `old_id` is no longer
    /// live, e.g. when two refreshes race with the same token.
    pub async fn rotate(
        pool: &PgPool,
        old_id: DbId,
        input: &CreateSession,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let claimed: Option<DbId> = sqlx::query_scalar(
            "UPDATE user_sessions SET is_revoked = true, revoked_at = NOW() \
             WHERE id = $1 AND is_revoked = false AND expires_at > NOW() \
             RETURNING id",
        )
        .bind(old_id)
        .fetch_optional(&mut *tx)
        .await?;
        if claimed.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO user_sessions \
                (user_id, refresh_token_hash, expires_at, user_agent, ip_address) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE user_sessions SET replaced_by = $2 WHERE id = $1")
            .bind(old_id)
            .bind(session.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(session))
    }

    /// Revoke every live session of a user (logout, deactivation, password
    /// reset, token reuse). Returns the number revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true, revoked_at = NOW() \
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Number of live sessions a user holds.
    pub async fn count_live_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_sessions \
             WHERE user_id = $1 AND is_revoked = false AND expires_at > NOW()",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Delete sessions past their expiry. Revoked rows stay until then so
    /// reuse of a rotated token is still detected.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE expires_at < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
