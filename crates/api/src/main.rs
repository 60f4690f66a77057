use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrine_api::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use vitrine_api::background::session_cleanup;
use vitrine_api::config::ServerConfig;
use vitrine_api::notifications;
use vitrine_api::router::build_app_router;
use vitrine_api::state::AppState;
use vitrine_core::roles::ROLE_ADMIN;
use vitrine_core::status::normalize_email;
use vitrine_db::models::user::CreateUser;
use vitrine_db::repositories::{RoleRepo, UserRepo};
use vitrine_db::DbPool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrine_api=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = vitrine_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    vitrine_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    vitrine_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    bootstrap_admin(&pool).await?;

    // --- Background jobs ---
    let cancel = CancellationToken::new();
    let cleanup_handle = tokio::spawn(session_cleanup::run(pool.clone(), cancel.clone()));

    // --- App ---
    let notifier = notifications::from_env(config.contact_notify_email.as_deref());
    let config = Arc::new(config);
    let state = AppState {
        pool,
        config: Arc::clone(&config),
        notifier,
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let host = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    cancel.cancel();
    let _ = tokio::time::timeout(
        Duration::from_secs(config.shutdown_timeout_secs),
        cleanup_handle,
    )
    .await;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Create the first admin account on an empty database.
///
/// Reads `BOOTSTRAP_ADMIN_USERNAME`, `BOOTSTRAP_ADMIN_EMAIL` and
/// `BOOTSTRAP_ADMIN_PASSWORD`. Does nothing once any user exists.
async fn bootstrap_admin(pool: &DbPool) -> anyhow::Result<()> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(());
    }

    let (Ok(username), Ok(email), Ok(password)) = (
        std::env::var("BOOTSTRAP_ADMIN_USERNAME"),
        std::env::var("BOOTSTRAP_ADMIN_EMAIL"),
        std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
    ) else {
        tracing::warn!("No users exist and BOOTSTRAP_ADMIN_* is not set; nobody can log in");
        return Ok(());
    };

    validate_password_strength(&password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| anyhow::anyhow!("BOOTSTRAP_ADMIN_PASSWORD: {msg}"))?;
    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Password hashing error: {e}"))?;

    let role = RoleRepo::find_by_name(pool, ROLE_ADMIN)
        .await?
        .context("Admin role missing; migrations incomplete")?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.trim().to_string(),
            email: normalize_email(&email),
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
