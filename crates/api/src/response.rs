//! Shared response envelope types for API handlers.
//!
//! All successful responses use a `{ "data": ... }` envelope. Use
//! [`DataResponse`] rather than ad-hoc `json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a paginated listing plus the unpaginated total.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
}
