//! rolegate API
//!
//! HTTP service for idempotent provisioning of database role memberships.
//! Each request opens its own catalog session against the server and
//! database named in the path, reconciles the requested state, and drops
//! the session.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::info;

use rolegate_api::{app_router, logging, AppState, Config};
use rolegate_core::SqlSessionFactory;

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values)
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "Starting rolegate API"
    );

    let factory = match SqlSessionFactory::new(config.connection.clone()) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Invalid connection settings: {e}");
            std::process::exit(1);
        }
    };

    info!(settings = ?factory.redacted_settings(), "Session factory ready");

    let app = app_router(AppState::new(Arc::new(factory)));

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Invalid bind address {}:{}: {e}", config.host, config.port);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "Listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
                // Fall through - we still want to wait for terminate signal
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                // Wait forever if we can't install the handler
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
