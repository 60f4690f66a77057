//! Vitrine API server library.
//!
//! Exposes config, state, error handling and routes so the binary
//! entrypoint and the integration tests build the exact same app.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notifications;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
