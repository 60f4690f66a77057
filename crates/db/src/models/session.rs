//! Refresh-token session model.

use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `user_sessions` table.
///
/// Rows outlive revocation until they expire so that a rotated token
/// presented a second time can still be recognised.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub revoked_at: Option<Timestamp>,
    /// The session this one was exchanged for on refresh.
    pub replaced_by: Option<DbId>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserSession {
    /// A token that was already rotated away is being presented again.
    pub fn is_reused(&self) -> bool {
        self.replaced_by.is_some()
    }

    /// Usable for a refresh at `now`.
    pub fn is_live(&self, now: Timestamp) -> bool {
        !self.is_revoked && self.expires_at > now
    }
}

pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn session(is_revoked: bool, expires_in: Duration, replaced_by: Option<DbId>) -> UserSession {
        let now = Utc::now();
        UserSession {
            id: 1,
            user_id: 7,
            refresh_token_hash: "hash".into(),
            expires_at: now + expires_in,
            is_revoked,
            revoked_at: is_revoked.then_some(now),
            replaced_by,
            user_agent: None,
            ip_address: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn fresh_session_is_live() {
        let s = session(false, Duration::days(1), None);
        assert!(s.is_live(Utc::now()));
        assert!(!s.is_reused());
    }

    #[test]
    fn expired_or_revoked_is_not_live() {
        assert!(!session(false, Duration::seconds(-1), None).is_live(Utc::now()));
        assert!(!session(true, Duration::days(1), None).is_live(Utc::now()));
    }

    #[test]
    fn rotated_session_counts_as_reuse() {
        assert!(session(true, Duration::days(1), Some(2)).is_reused());
    }
}
