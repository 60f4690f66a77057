//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller identified by a Bearer access token.
//! - [`rbac::RequireEditor`] -- content management (`editor` or `admin`).
//! - [`rbac::RequireAdmin`] -- users, settings, trash purge, audit trail.

pub mod auth;
pub mod rbac;
