use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notifications::Notifier;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: vitrine_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Delivers contact form notifications (SMTP, or a no-op when unconfigured).
    pub notifier: Arc<dyn Notifier>,
}
