//! Server startup and graceful shutdown

use anyhow::Result;
use axum::Router;
use clipnote_core::{Channel, Config};
use tokio_util::sync::CancellationToken;

/// Start the server with graceful shutdown
///
/// `shutdown` is cancelled once a signal arrives, which aborts in-flight
/// uploads (their partial files are removed) while connections drain.
pub async fn start_server(config: &Config, app: Router, shutdown: CancellationToken) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port());
    tracing::info!(addr = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let max_image_mb = config.ceiling_for(Channel::Image) / 1024 / 1024;
    let max_video_mb = config.ceiling_for(Channel::Video) / 1024 / 1024;
    tracing::info!(
        max_image_mb,
        max_video_mb,
        public_base_url = %config.public_base_url(),
        "Server ready and accepting connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    Ok(())
}

/// Signal handler for graceful shutdown
///
/// Listens for Ctrl+C (SIGINT) and SIGTERM.
///
/// # Panics
/// Panics if a signal handler cannot be installed (unrecoverable system error).
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }

    tracing::info!("Shutting down gracefully...");
    shutdown.cancel();
}
