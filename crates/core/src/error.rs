//! Domain error type shared by every layer above `core`.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Public lookups address content by slug or path rather than id.
    #[error("{entity} '{key}' not found")]
    NotFoundByKey { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found_by_key(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFoundByKey {
            entity,
            key: key.into(),
        }
    }
}
