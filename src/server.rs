//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, service wiring and the Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::infrastructure::persistence::{SqliteMappingRepository, connect};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::HashCodeGenerator;
use crate::utils::url_verifier::{ReachabilityVerifier, SyntaxVerifier, UrlVerifier};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the handler state from an open pool.
///
/// Submitted URLs are probed over HTTP unless `URL_CHECK` is off.
pub fn build_state(pool: sqlx::SqlitePool, config: &Config) -> AppState {
    let repository = Arc::new(SqliteMappingRepository::with_timeout(
        Arc::new(pool),
        config.store_timeout(),
    ));
    let link_service = LinkService::new(repository, Arc::new(HashCodeGenerator::new()))
        .with_max_attempts(config.code_max_attempts);

    let verifier: Arc<dyn UrlVerifier> = if config.url_check {
        Arc::new(ReachabilityVerifier::new(config.url_check_timeout()))
    } else {
        Arc::new(SyntaxVerifier)
    };

    AppState::new(Arc::new(link_service), verifier)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect(&config.database_url, &config.pool_settings())
        .await
        .context("Failed to open database")?;
    tracing::info!("Connected to database");

    let state = build_state(pool.clone(), &config);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
